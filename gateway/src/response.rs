//! Response marshalling and error mapping.
//!
//! Success replies are either a JSON document or the empty sentinel
//! (200 with no body). Every failure renders as the contract's
//! `ApiResponse` shape `{code, type, message}` with the status fixed by
//! the failure kind; internal diagnostics never reach the client.

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::Response;
use error::GatewayError;
use schema::ApiResponse;

use crate::dispatch::Reply;

/// Render a successful reply.
pub fn success(reply: Reply) -> Response {
    match reply {
        Reply::Empty => Response::builder()
            .status(StatusCode::OK)
            .body(Body::empty())
            .expect("static response"),
        Reply::Json(value) => json_response(StatusCode::OK, &value),
    }
}

/// Render a failure as the `ApiResponse` error shape.
pub fn failure(err: &GatewayError) -> Response {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ApiResponse::new(i32::from(err.status()), err.kind(), err.to_string());
    let value = serde_json::to_value(&body).unwrap_or_default();
    json_response(status, &value)
}

fn json_response(status: StatusCode, value: &serde_json::Value) -> Response {
    let body = serde_json::to_vec(value).unwrap_or_default();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("static response")
}
