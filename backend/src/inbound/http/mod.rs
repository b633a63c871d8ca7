//! HTTP inbound adapter exposing the SOS and health endpoints.

pub mod error;
pub mod health;
pub mod sos;
pub mod state;

pub use crate::domain::ApiResult;
