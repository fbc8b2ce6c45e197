//! Contract enums, bound by member name.
//!
//! Member names match case-sensitively; an unknown name is a binding
//! error at the call site. Values are 0-based sequential.

use serde::Serialize;

/// Pet status in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PetStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "sold")]
    Sold,
}

impl PetStatus {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Sold => "sold",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "available" => Some(Self::Available),
            "pending" => Some(Self::Pending),
            "sold" => Some(Self::Sold),
            _ => None,
        }
    }
}

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderStatus {
    #[serde(rename = "placed")]
    Placed,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "delivered")]
    Delivered,
}

impl OrderStatus {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Approved => "approved",
            Self::Delivered => "delivered",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "placed" => Some(Self::Placed),
            "approved" => Some(Self::Approved),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}
