//! Petstore contract definitions shared by the gateway and services.
//!
//! The contract is fixed at build time: message types with explicit
//! presence metadata, enums bound by member name, well-known types, and
//! the HTTP binding (verb + path template) of every RPC. Binding from
//! JSON is done by hand-written per-message functions over
//! `serde_json::Value` rather than reflection, so binding failures can
//! name the offending field.

pub mod bind;
pub mod enums;
pub mod messages;
pub mod rpc;
pub mod service;
pub mod well_known;

pub use enums::{OrderStatus, PetStatus};
pub use messages::{ApiResponse, Category, Order, Pet, Tag, User};
pub use rpc::{Rpc, ServiceKind};
pub use service::{HandlerResult, PetService, StoreService, UserService};
pub use well_known::{Inventory, Timestamp};
