//! Request dispatch: the per-RPC glue between bound requests and the
//! external service traits.
//!
//! Each RPC gets exactly one handler invocation, no retries and no
//! internal timeout. Binding failures short-circuit before the handler
//! is reached; handler failures pass through to the error mapper
//! unchanged.

use std::sync::Arc;

use bytes::Bytes;
use error::{GatewayError, HandlerError, Result};
use schema::service::{PetService, StoreService, UserService};
use schema::{Order, Pet, Rpc, User};
use serde::Serialize;
use serde_json::Value;

use crate::binder::{self, Query};
use crate::config::GatewayConfig;
use crate::registry::{PathVars, RouteTable};

/// A marshalled success result.
#[derive(Debug)]
pub enum Reply {
    /// HTTP 200 with an empty body and no content type.
    Empty,
    /// HTTP 200 with a JSON body.
    Json(Value),
}

impl Reply {
    fn json<T: Serialize>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Reply::Json)
            .map_err(|e| HandlerError::Internal(format!("failed to marshal response: {e}")).into())
    }
}

/// Registered business-logic handlers, one slot per contract service.
///
/// An empty slot turns every RPC of that service into a 501, distinct
/// from the 404 of an unmatched path.
#[derive(Clone, Default)]
pub struct Handlers {
    pub pet: Option<Arc<dyn PetService>>,
    pub store: Option<Arc<dyn StoreService>>,
    pub user: Option<Arc<dyn UserService>>,
}

impl Handlers {
    fn require_pet(&self, rpc: Rpc) -> Result<&Arc<dyn PetService>> {
        self.pet
            .as_ref()
            .ok_or_else(|| GatewayError::NotImplemented(rpc.name().to_string()))
    }

    fn require_store(&self, rpc: Rpc) -> Result<&Arc<dyn StoreService>> {
        self.store
            .as_ref()
            .ok_or_else(|| GatewayError::NotImplemented(rpc.name().to_string()))
    }

    fn require_user(&self, rpc: Rpc) -> Result<&Arc<dyn UserService>> {
        self.user
            .as_ref()
            .ok_or_else(|| GatewayError::NotImplemented(rpc.name().to_string()))
    }
}

/// The transcoding engine: route table, handlers and configuration.
/// Built once at startup and shared immutably across requests.
pub struct Gateway {
    routes: RouteTable,
    handlers: Handlers,
    config: GatewayConfig,
}

impl Gateway {
    pub fn new(config: GatewayConfig, handlers: Handlers) -> anyhow::Result<Self> {
        Ok(Self {
            routes: RouteTable::with_contract()?,
            handlers,
            config,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Transcode one request: route, bind, dispatch, marshal.
    pub async fn handle(
        &self,
        verb: &str,
        path: &str,
        raw_query: Option<&str>,
        content_type: Option<&str>,
        body: &Bytes,
    ) -> Result<Reply> {
        let (rpc, vars) = self.routes.resolve(verb, path)?;
        tracing::debug!(rpc = rpc.name(), verb, path, "resolved route");

        let query = binder::parse_query(raw_query);
        let body = self.decode_body(rpc, content_type, body)?;
        self.dispatch(rpc, &vars, &query, body.as_ref()).await
    }

    /// Decode the JSON body for RPCs that declare one. Routes without
    /// a body field ignore any payload (the two form-data routes carry
    /// only their path parameter in the contract).
    fn decode_body(
        &self,
        rpc: Rpc,
        content_type: Option<&str>,
        body: &Bytes,
    ) -> Result<Option<Value>> {
        if !rpc.expects_json_body() {
            return Ok(None);
        }

        if let Some(ct) = content_type {
            let essence = ct.split(';').next().unwrap_or(ct).trim();
            if !essence.eq_ignore_ascii_case("application/json") {
                return Err(GatewayError::UnsupportedMediaType(essence.to_string()));
            }
        }

        if body.is_empty() {
            return Err(GatewayError::invalid_argument("request body is required"));
        }

        let value = serde_json::from_slice(body)
            .map_err(|e| GatewayError::invalid_argument(format!("malformed JSON body: {e}")))?;
        Ok(Some(value))
    }

    async fn dispatch(
        &self,
        rpc: Rpc,
        vars: &PathVars,
        query: &Query,
        body: Option<&Value>,
    ) -> Result<Reply> {
        match rpc {
            Rpc::GetPetById => {
                let id = binder::positive_id("petId", binder::path_i64(vars, "petId")?)?;
                let pet = self.handlers.require_pet(rpc)?.get_pet_by_id(id).await?;
                Reply::json(&pet)
            }
            Rpc::UpdatePetWithForm => {
                let id = binder::positive_id("petId", binder::path_i64(vars, "petId")?)?;
                self.handlers
                    .require_pet(rpc)?
                    .update_pet_with_form(id)
                    .await?;
                Ok(Reply::Empty)
            }
            Rpc::DeletePet => {
                let id = binder::positive_id("petId", binder::path_i64(vars, "petId")?)?;
                self.handlers.require_pet(rpc)?.delete_pet(id).await?;
                Ok(Reply::Empty)
            }
            Rpc::UploadFile => {
                let id = binder::positive_id("petId", binder::path_i64(vars, "petId")?)?;
                let response = self.handlers.require_pet(rpc)?.upload_file(id).await?;
                Reply::json(&response)
            }
            Rpc::AddPet => {
                let pet = Pet::bind(required_body(body)?, "")?;
                self.handlers.require_pet(rpc)?.add_pet(pet).await?;
                Ok(Reply::Empty)
            }
            Rpc::UpdatePet => {
                let pet = Pet::bind(required_body(body)?, "")?;
                self.handlers.require_pet(rpc)?.update_pet(pet).await?;
                Ok(Reply::Empty)
            }
            Rpc::FindPetsByStatus => {
                let statuses = binder::pet_status_filter(binder::required_query(query, "status")?)?;
                let pets = self
                    .handlers
                    .require_pet(rpc)?
                    .find_pets_by_status(statuses)
                    .await?;
                Reply::json(&pets)
            }
            Rpc::FindPetsByTags => {
                let tags = binder::tag_filter(binder::required_query(query, "tags")?)?;
                let pet = self
                    .handlers
                    .require_pet(rpc)?
                    .find_pets_by_tags(tags)
                    .await?;
                Reply::json(&pet)
            }
            Rpc::PlaceOrder => {
                let order = Order::bind(required_body(body)?, "")?;
                let placed = self.handlers.require_store(rpc)?.place_order(order).await?;
                Reply::json(&placed)
            }
            Rpc::GetOrderById => {
                let id = binder::order_id_in_range(binder::path_i64(vars, "orderId")?)?;
                let order = self
                    .handlers
                    .require_store(rpc)?
                    .get_order_by_id(id)
                    .await?;
                Reply::json(&order)
            }
            Rpc::DeleteOrder => {
                let id = binder::positive_id("orderId", binder::path_i64(vars, "orderId")?)?;
                self.handlers.require_store(rpc)?.delete_order(id).await?;
                Ok(Reply::Empty)
            }
            Rpc::GetInventory => {
                let inventory = self.handlers.require_store(rpc)?.get_inventory().await?;
                Reply::json(&inventory)
            }
            Rpc::CreateUser => {
                let user = User::bind(required_body(body)?, "")?;
                self.handlers.require_user(rpc)?.create_user(user).await?;
                Ok(Reply::Empty)
            }
            Rpc::CreateUsersWithArrayInput => {
                let users = User::bind_list(required_body(body)?, "users")?;
                self.handlers
                    .require_user(rpc)?
                    .create_users_with_array(users)
                    .await?;
                Ok(Reply::Empty)
            }
            Rpc::CreateUsersWithListInput => {
                let users = User::bind_list(required_body(body)?, "users")?;
                self.handlers
                    .require_user(rpc)?
                    .create_users_with_list(users)
                    .await?;
                Ok(Reply::Empty)
            }
            Rpc::GetUserByName => {
                let username = binder::path_string(vars, "username")?;
                let user = self
                    .handlers
                    .require_user(rpc)?
                    .get_user_by_name(username)
                    .await?;
                Reply::json(&user)
            }
            Rpc::UpdateUser => {
                let username = binder::path_string(vars, "username")?;
                let user = User::bind(required_body(body)?, "")?;
                self.handlers
                    .require_user(rpc)?
                    .update_user(username, user)
                    .await?;
                Ok(Reply::Empty)
            }
            Rpc::DeleteUser => {
                let username = binder::path_string(vars, "username")?;
                self.handlers.require_user(rpc)?.delete_user(username).await?;
                Ok(Reply::Empty)
            }
            Rpc::LoginUser => {
                let username = binder::required_query(query, "username")?.to_string();
                let password = binder::required_query(query, "password")?.to_string();
                // The declared contract returns a Pet here; preserved
                // for wire compatibility.
                let pet = self
                    .handlers
                    .require_user(rpc)?
                    .login_user(username, password)
                    .await?;
                Reply::json(&pet)
            }
            Rpc::LogoutUser => {
                self.handlers.require_user(rpc)?.logout_user().await?;
                Ok(Reply::Empty)
            }
        }
    }
}

/// decode_body guarantees a body for every RPC that declares one; this
/// guards against a mismatch between the two tables.
fn required_body(body: Option<&Value>) -> Result<&Value> {
    body.ok_or_else(|| GatewayError::invalid_argument("request body is required"))
}
