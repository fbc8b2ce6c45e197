//! HTTP server wiring.
//!
//! The engine owns all contract routing, so axum is wired with a single
//! fallback handler; axum-level routes exist only for surfaces outside
//! the contract (health). Each request is handled by an independent
//! task; the gateway itself is shared read-only behind an `Arc`.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::header;
use axum::response::{Json, Response};
use axum::routing::get;
use axum::Router;
use error::GatewayError;

use crate::dispatch::Gateway;
use crate::response;

/// Build the axum application around a gateway.
pub fn app(gateway: Arc<Gateway>) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .fallback(transcode)
        .with_state(gateway)
}

async fn health(State(gateway): State<Arc<Gateway>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "healthy": true,
        "version": gateway.config().version,
    }))
}

async fn transcode(State(gateway): State<Arc<Gateway>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let verb = parts.method.as_str();
    let path = parts.uri.path();

    let limit = gateway.config().max_body_bytes;
    let bytes = match to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(_) => {
            let err = GatewayError::PayloadTooLarge { limit };
            tracing::warn!(verb, path, "request body over {limit} bytes");
            return response::failure(&err);
        }
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    match gateway
        .handle(verb, path, parts.uri.query(), content_type, &bytes)
        .await
    {
        Ok(reply) => {
            tracing::debug!(verb, path, "request ok");
            response::success(reply)
        }
        Err(err) => {
            tracing::warn!(verb, path, status = err.status(), error = %err, "request failed");
            response::failure(&err)
        }
    }
}
