//! Driven port for the external photo provider.
//!
//! The provider owns the photo JSON; adapters return it untouched apart from
//! reshaping search results into a [`PhotoSearchPage`].

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Orientation, PhotoPage, PhotoSearchPage};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the photo provider.
    pub enum PhotoSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "photo provider transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "photo provider timeout: {message}",
        /// The provider rate-limited the request.
        RateLimited { message: String } =>
            "photo provider rate limited request: {message}",
        /// The requested photo or collection does not exist.
        NotFound { message: String } =>
            "photo provider resource not found: {message}",
        /// The provider rejected the request.
        InvalidRequest { message: String } =>
            "photo provider request invalid: {message}",
        /// The response could not be decoded.
        Decode { message: String } =>
            "photo provider response decode failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Search photos matching a non-blank query.
    async fn search_photos(
        &self,
        query: &str,
        page: PhotoPage,
    ) -> Result<PhotoSearchPage, PhotoSourceError>;

    /// Fetch one photo.
    async fn photo(&self, id: &str) -> Result<Value, PhotoSourceError>;

    /// Fetch one provider collection.
    async fn collection(&self, id: &str) -> Result<Value, PhotoSourceError>;

    /// Fetch photos of one provider collection.
    async fn collection_photos(
        &self,
        id: &str,
        page: PhotoPage,
        orientation: Option<Orientation>,
    ) -> Result<Value, PhotoSourceError>;
}

/// Fixture source with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePhotoSource;

#[async_trait]
impl PhotoSource for FixturePhotoSource {
    async fn search_photos(
        &self,
        _query: &str,
        _page: PhotoPage,
    ) -> Result<PhotoSearchPage, PhotoSourceError> {
        Ok(PhotoSearchPage::default())
    }

    async fn photo(&self, id: &str) -> Result<Value, PhotoSourceError> {
        Err(PhotoSourceError::not_found(format!("photo {id}")))
    }

    async fn collection(&self, id: &str) -> Result<Value, PhotoSourceError> {
        Err(PhotoSourceError::not_found(format!("collection {id}")))
    }

    async fn collection_photos(
        &self,
        _id: &str,
        _page: PhotoPage,
        _orientation: Option<Orientation>,
    ) -> Result<Value, PhotoSourceError> {
        Ok(Value::Array(Vec::new()))
    }
}
