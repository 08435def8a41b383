//! Models Module
//!
//! Request and response bodies for the cache admin API.

mod requests;
mod responses;

pub use requests::{SetRequest, VersionRequest};
pub use responses::{
    ClearResponse, DeleteResponse, ErrorResponse, GetResponse, HasResponse, HealthResponse,
    SetResponse, SweepResponse, VersionResponse,
};
