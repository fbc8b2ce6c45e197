//! End-to-end transcoding tests: HTTP request in, HTTP response out,
//! driven through the real axum application with `oneshot`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use error::HandlerError;
use gateway_lib::{server, Gateway, GatewayConfig, Handlers};
use petstore_service::Petstore;
use schema::service::{HandlerResult, PetService, StoreService};
use schema::{ApiResponse, Order, Pet, PetStatus};

fn app_with(config: GatewayConfig, handlers: Handlers) -> Router {
    let gateway = Gateway::new(config, handlers).unwrap();
    server::app(Arc::new(gateway))
}

/// An app backed by the in-memory petstore, plus the store itself for
/// seeding fixtures.
fn petstore_app() -> (Router, Arc<Petstore>) {
    let store = Arc::new(Petstore::new());
    let handlers = Handlers {
        pet: Some(store.clone()),
        store: Some(store.clone()),
        user: Some(store.clone()),
    };
    (app_with(GatewayConfig::default(), handlers), store)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn send_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = petstore_app();
    let (status, body) = send_json(app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], json!(true));
}

#[tokio::test]
async fn test_get_order_round_trip() {
    let (app, store) = petstore_app();
    store.insert_order(Order {
        id: Some(5),
        pet_id: 3,
        quantity: 2,
        ..Default::default()
    });

    let (status, body) = send_json(app, "GET", "/store/order/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 5, "petId": 3, "quantity": 2, "complete": false })
    );
}

#[tokio::test]
async fn test_order_id_validation_runs_before_dispatch() {
    struct Recording {
        invoked: AtomicBool,
    }

    #[async_trait]
    impl StoreService for Recording {
        async fn place_order(&self, order: Order) -> HandlerResult<Order> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok(order)
        }
        async fn get_order_by_id(&self, _order_id: i64) -> HandlerResult<Order> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok(Order::default())
        }
        async fn delete_order(&self, _order_id: i64) -> HandlerResult<()> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok(())
        }
        async fn get_inventory(&self) -> HandlerResult<schema::Inventory> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok(schema::Inventory::new())
        }
    }

    let store = Arc::new(Recording {
        invoked: AtomicBool::new(false),
    });
    let handlers = Handlers {
        store: Some(store.clone()),
        ..Default::default()
    };
    let app = app_with(GatewayConfig::default(), handlers);

    // Lookup ids are restricted to [1, 10]; deletion ids must be >= 1.
    for uri in ["/store/order/0", "/store/order/11"] {
        let (status, body) = send_json(app.clone(), "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["type"], json!("InvalidArgument"));
    }
    let (status, _) = send(app, "DELETE", "/store/order/-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(!store.invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_delete_order_returns_empty_body() {
    let (app, store) = petstore_app();
    store.insert_order(Order {
        id: Some(7),
        ..Default::default()
    });

    let request = Request::builder()
        .method("DELETE")
        .uri("/store/order/7")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[derive(Default)]
struct RecordingPets {
    statuses: Mutex<Option<Vec<PetStatus>>>,
    added: Mutex<Option<Pet>>,
}

#[async_trait]
impl PetService for RecordingPets {
    async fn get_pet_by_id(&self, _pet_id: i64) -> HandlerResult<Pet> {
        Err(HandlerError::Internal("not under test".into()))
    }
    async fn update_pet_with_form(&self, _pet_id: i64) -> HandlerResult<()> {
        Ok(())
    }
    async fn delete_pet(&self, _pet_id: i64) -> HandlerResult<()> {
        Ok(())
    }
    async fn upload_file(&self, _pet_id: i64) -> HandlerResult<ApiResponse> {
        Ok(ApiResponse::default())
    }
    async fn add_pet(&self, pet: Pet) -> HandlerResult<()> {
        *self.added.lock().unwrap() = Some(pet);
        Ok(())
    }
    async fn update_pet(&self, _pet: Pet) -> HandlerResult<()> {
        Ok(())
    }
    async fn find_pets_by_status(&self, statuses: Vec<PetStatus>) -> HandlerResult<Vec<Pet>> {
        *self.statuses.lock().unwrap() = Some(statuses);
        Ok(Vec::new())
    }
    async fn find_pets_by_tags(&self, _tags: Vec<String>) -> HandlerResult<Pet> {
        Ok(Pet::default())
    }
}

#[tokio::test]
async fn test_find_by_status_binds_comma_separated_filter() {
    let pets = Arc::new(RecordingPets::default());
    let handlers = Handlers {
        pet: Some(pets.clone()),
        ..Default::default()
    };
    let app = app_with(GatewayConfig::default(), handlers);

    let (status, _) = send(
        app.clone(),
        "GET",
        "/pet/findByStatus?status=available%2Csold",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        pets.statuses.lock().unwrap().take(),
        Some(vec![PetStatus::Available, PetStatus::Sold])
    );

    let (status, body) = send_json(app, "GET", "/pet/findByStatus?status=bogus", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("invalid argument: status: unknown status \"bogus\"")
    );
}

#[tokio::test]
async fn test_add_pet_binds_wrapped_repeated_field() {
    let pets = Arc::new(RecordingPets::default());
    let handlers = Handlers {
        pet: Some(pets.clone()),
        ..Default::default()
    };
    let app = app_with(GatewayConfig::default(), handlers);

    let body = json!({
        "id": null,
        "name": "doggie",
        "photoUrls": { "items": ["a.jpg"] }
    });
    let (status, bytes) = send(app, "POST", "/pet", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());

    let added = pets.added.lock().unwrap().take().unwrap();
    assert_eq!(added.id, None);
    assert_eq!(added.name, "doggie");
    assert_eq!(added.photo_urls, vec!["a.jpg"]);
}

#[tokio::test]
async fn test_marshalled_pet_omits_unset_optionals() {
    let (app, store) = petstore_app();
    store.insert_pet(Pet {
        name: "Rex".into(),
        photo_urls: vec!["a.jpg".into()],
        ..Default::default()
    });

    let (status, body) = send_json(app, "GET", "/pet/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 1, "name": "Rex", "photoUrls": ["a.jpg"] })
    );
}

#[tokio::test]
async fn test_unrouted_path_is_404_api_response() {
    let (app, _) = petstore_app();
    let (status, body) = send_json(app, "GET", "/pets/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "code": 404,
            "type": "NotFound",
            "message": "no route matches GET /pets/1"
        })
    );
}

#[tokio::test]
async fn test_unregistered_service_is_501() {
    let app = app_with(GatewayConfig::default(), Handlers::default());
    let (status, body) = send_json(app, "GET", "/pet/42", None).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body["type"], json!("NotImplemented"));
    assert_eq!(
        body["message"],
        json!("no handler registered for PetService/GetPetById")
    );
}

#[tokio::test]
async fn test_wrong_content_type_is_415() {
    let (app, _) = petstore_app();
    let request = Request::builder()
        .method("POST")
        .uri("/pet")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("name=Rex"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let store = Arc::new(Petstore::new());
    let handlers = Handlers {
        pet: Some(store),
        ..Default::default()
    };
    let config = GatewayConfig {
        max_body_bytes: 64,
        ..Default::default()
    };
    let app = app_with(config, handlers);

    let body = json!({ "name": "Rex", "photoUrls": [format!("{}.jpg", "x".repeat(100))] });
    let (status, error) = send_json(app, "POST", "/pet", Some(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error["type"], json!("PayloadTooLarge"));
}

#[tokio::test]
async fn test_login_returns_pet_shape() {
    let (app, store) = petstore_app();
    store.add_user(schema::User {
        username: "ada".into(),
        password: "s3cret".into(),
        ..Default::default()
    });

    let (status, body) = send_json(
        app.clone(),
        "GET",
        "/user/login?username=ada&password=s3cret",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // The declared contract returns a Pet from login.
    assert_eq!(body["name"], json!("ada"));
    assert_eq!(body["photoUrls"], json!([]));

    let (status, body) = send_json(
        app,
        "GET",
        "/user/login?username=ada&password=wrong",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["type"], json!("Unauthorized"));
}

#[tokio::test]
async fn test_login_literal_beats_username_placeholder() {
    // /user/login must resolve to the login route, not /user/{username},
    // so a missing query parameter reports 400 rather than a lookup of
    // the user named "login".
    let (app, _) = petstore_app();
    let (status, body) = send_json(app, "GET", "/user/login", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("invalid argument: username: missing required query parameter")
    );
}

#[tokio::test]
async fn test_username_path_segment_is_percent_decoded() {
    let (app, store) = petstore_app();
    store.add_user(schema::User {
        username: "a@b".into(),
        ..Default::default()
    });

    let (status, body) = send_json(app, "GET", "/user/a%40b", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], json!("a@b"));
}

#[tokio::test]
async fn test_create_users_with_array_reports_element_index() {
    let (app, _) = petstore_app();
    let body = json!([
        { "username": "ada" },
        { "username": 42 }
    ]);
    let (status, error) = send_json(app, "POST", "/user/createWithArray", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error["message"],
        json!("invalid argument: users[1].username: expected a string")
    );
}

#[tokio::test]
async fn test_inventory_is_a_sparse_map() {
    let (app, store) = petstore_app();
    store.insert_pet(Pet {
        name: "Rex".into(),
        status: Some(PetStatus::Sold),
        ..Default::default()
    });

    let (status, body) = send_json(app, "GET", "/store/inventory", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sold": 1 }));
}
