//! Contract messages with hand-written JSON binders.
//!
//! Serialization uses serde with the contract's camelCase field names;
//! `optional` fields are `Option<T>` and are omitted when unset, while
//! `implicit` fields are always emitted with the zero value as default.
//! Binding goes through the static field accessors in [`crate::bind`].

use error::Result;
use serde::Serialize;
use serde_json::Value;

use crate::bind;
use crate::enums::{OrderStatus, PetStatus};
use crate::well_known::Timestamp;

/// A category a pet belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl Category {
    pub fn bind(value: &Value, at: &str) -> Result<Self> {
        let map = bind::as_object(value, at)?;
        Ok(Self {
            id: bind::optional_i64(map, "id", at)?,
            name: bind::implicit_string(map, "name", at)?,
        })
    }
}

/// A tag attached to a pet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl Tag {
    pub fn bind(value: &Value, at: &str) -> Result<Self> {
        let map = bind::as_object(value, at)?;
        Ok(Self {
            id: bind::optional_i64(map, "id", at)?,
            name: bind::implicit_string(map, "name", at)?,
        })
    }
}

/// A pet in the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub name: String,
    #[serde(rename = "photoUrls")]
    pub photo_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PetStatus>,
}

impl Pet {
    pub fn bind(value: &Value, at: &str) -> Result<Self> {
        let map = bind::as_object(value, at)?;
        let category = match map.get("category").filter(|v| !v.is_null()) {
            Some(v) => Some(Category::bind(v, &bind::path(at, "category"))?),
            None => None,
        };
        let tags = match map.get("tags").filter(|v| !v.is_null()) {
            Some(v) => Some(bind::message_list(v, &bind::path(at, "tags"), Tag::bind)?),
            None => None,
        };
        let status = match bind::optional_string(map, "status", at)? {
            Some(name) => Some(PetStatus::from_name(&name).ok_or_else(|| {
                error::GatewayError::invalid_argument(format!(
                    "{}: unknown status \"{name}\"",
                    bind::path(at, "status")
                ))
            })?),
            None => None,
        };
        Ok(Self {
            id: bind::optional_i64(map, "id", at)?,
            category,
            name: bind::implicit_string(map, "name", at)?,
            photo_urls: bind::string_list(map, "photoUrls", at)?,
            tags,
            status,
        })
    }
}

/// An order for a pet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "petId")]
    pub pet_id: i64,
    pub quantity: i32,
    #[serde(rename = "shipDate", skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    pub complete: bool,
}

impl Order {
    pub fn bind(value: &Value, at: &str) -> Result<Self> {
        let map = bind::as_object(value, at)?;
        let status = match bind::optional_string(map, "status", at)? {
            Some(name) => Some(OrderStatus::from_name(&name).ok_or_else(|| {
                error::GatewayError::invalid_argument(format!(
                    "{}: unknown status \"{name}\"",
                    bind::path(at, "status")
                ))
            })?),
            None => None,
        };
        Ok(Self {
            id: bind::optional_i64(map, "id", at)?,
            pet_id: bind::implicit_i64(map, "petId", at)?,
            quantity: bind::implicit_i32(map, "quantity", at)?,
            ship_date: bind::optional_timestamp(map, "shipDate", at)?,
            status,
            complete: bind::implicit_bool(map, "complete", at)?,
        })
    }
}

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    #[serde(rename = "userStatus")]
    pub user_status: i32,
}

impl User {
    pub fn bind(value: &Value, at: &str) -> Result<Self> {
        let map = bind::as_object(value, at)?;
        Ok(Self {
            id: bind::optional_i64(map, "id", at)?,
            username: bind::implicit_string(map, "username", at)?,
            first_name: bind::implicit_string(map, "firstName", at)?,
            last_name: bind::implicit_string(map, "lastName", at)?,
            email: bind::implicit_string(map, "email", at)?,
            password: bind::implicit_string(map, "password", at)?,
            phone: bind::implicit_string(map, "phone", at)?,
            user_status: bind::implicit_i32(map, "userStatus", at)?,
        })
    }

    /// Bind a JSON array of users, reporting the index of the first
    /// invalid element.
    pub fn bind_list(value: &Value, at: &str) -> Result<Vec<Self>> {
        bind::message_list(value, at, Self::bind)
    }
}

/// Uniform operation result shape, also used for all error bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiResponse {
    pub code: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ApiResponse {
    pub fn new(code: i32, kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: kind.into(),
            message: message.into(),
        }
    }
}
