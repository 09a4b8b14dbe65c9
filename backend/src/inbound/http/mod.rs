//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into driving-port calls and map domain errors
//! onto responses. They never touch persistence or the photo provider
//! directly.

pub mod collections;
pub mod error;
pub mod health;
pub mod photos;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
mod validation;
pub mod webhooks;

pub use error::ApiResult;
