//! API Module
//!
//! HTTP handlers and routing for the cache admin API.
//!
//! # Endpoints
//! - `PUT /set`, `GET /get/:key`, `GET /has/:key`, `DELETE /del/:key`
//! - `POST /clear`, `POST /sweep`, `PUT /version`
//! - `GET /stats`, `GET /health`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
