//! Unsplash outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `PhotoSource`
//! port.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_UNSPLASH_BASE_URL, UnsplashHttpSource};
