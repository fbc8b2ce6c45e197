//! Petstore transcoding gateway library.
//!
//! Serves the petstore RPC contract over HTTP/JSON: a route table built
//! from the contract's path templates, a request binder that turns path
//! segments, query strings and JSON bodies into typed messages, a
//! dispatcher over the external service traits, and a response
//! marshaller with a uniform error shape.

pub mod binder;
pub mod config;
pub mod dispatch;
pub mod registry;
pub mod response;
pub mod server;

pub use config::GatewayConfig;
pub use dispatch::{Gateway, Handlers, Reply};
pub use registry::{PathTemplate, RouteTable};
