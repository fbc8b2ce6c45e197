//! Service traits for the three contract services.
//!
//! These are the seams between the gateway and the external business
//! logic: the gateway binds requests, calls exactly one trait method,
//! and marshals the result. Implementations live elsewhere (the
//! in-memory `petstore-service` crate, or anything else).
//!
//! Two declared-contract quirks are preserved for wire compatibility:
//! `login_user` returns a `Pet` and `find_pets_by_tags` returns a
//! single `Pet` (see DESIGN.md).

use async_trait::async_trait;
use error::HandlerError;

use crate::messages::{ApiResponse, Order, Pet, User};
use crate::enums::PetStatus;
use crate::well_known::Inventory;

pub type HandlerResult<T> = std::result::Result<T, HandlerError>;

#[async_trait]
pub trait PetService: Send + Sync {
    async fn get_pet_by_id(&self, pet_id: i64) -> HandlerResult<Pet>;
    async fn update_pet_with_form(&self, pet_id: i64) -> HandlerResult<()>;
    async fn delete_pet(&self, pet_id: i64) -> HandlerResult<()>;
    async fn upload_file(&self, pet_id: i64) -> HandlerResult<ApiResponse>;
    async fn add_pet(&self, pet: Pet) -> HandlerResult<()>;
    async fn update_pet(&self, pet: Pet) -> HandlerResult<()>;
    async fn find_pets_by_status(&self, statuses: Vec<PetStatus>) -> HandlerResult<Vec<Pet>>;
    async fn find_pets_by_tags(&self, tags: Vec<String>) -> HandlerResult<Pet>;
}

#[async_trait]
pub trait StoreService: Send + Sync {
    async fn place_order(&self, order: Order) -> HandlerResult<Order>;
    async fn get_order_by_id(&self, order_id: i64) -> HandlerResult<Order>;
    async fn delete_order(&self, order_id: i64) -> HandlerResult<()>;
    async fn get_inventory(&self) -> HandlerResult<Inventory>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn create_user(&self, user: User) -> HandlerResult<()>;
    async fn create_users_with_array(&self, users: Vec<User>) -> HandlerResult<()>;
    async fn create_users_with_list(&self, users: Vec<User>) -> HandlerResult<()>;
    async fn get_user_by_name(&self, username: String) -> HandlerResult<User>;
    async fn update_user(&self, username: String, user: User) -> HandlerResult<()>;
    async fn delete_user(&self, username: String) -> HandlerResult<()>;
    async fn login_user(&self, username: String, password: String) -> HandlerResult<Pet>;
    async fn logout_user(&self) -> HandlerResult<()>;
}
