//! Driving port for photo search and provider collection browsing.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, Orientation, PhotoPage, PhotoSearchPage};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PhotoSearchQuery: Send + Sync {
    /// Search photos; a blank query yields an empty page without a provider
    /// call.
    async fn search_photos(&self, query: &str, page: PhotoPage) -> Result<PhotoSearchPage, Error>;

    /// One photo's provider metadata; `None` for a blank id.
    async fn photo_details(&self, id: &str) -> Result<Option<Value>, Error>;

    /// One provider collection.
    async fn external_collection(&self, id: &str) -> Result<Value, Error>;

    /// Photos of one provider collection.
    async fn external_collection_photos(
        &self,
        id: &str,
        page: PhotoPage,
        orientation: Option<Orientation>,
    ) -> Result<Value, Error>;
}

/// Fixture query with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePhotoSearchQuery;

#[async_trait]
impl PhotoSearchQuery for FixturePhotoSearchQuery {
    async fn search_photos(
        &self,
        _query: &str,
        _page: PhotoPage,
    ) -> Result<PhotoSearchPage, Error> {
        Ok(PhotoSearchPage::default())
    }

    async fn photo_details(&self, _id: &str) -> Result<Option<Value>, Error> {
        Ok(None)
    }

    async fn external_collection(&self, id: &str) -> Result<Value, Error> {
        Err(Error::not_found(format!("Unsplash collection {id} not found.")))
    }

    async fn external_collection_photos(
        &self,
        _id: &str,
        _page: PhotoPage,
        _orientation: Option<Orientation>,
    ) -> Result<Value, Error> {
        Ok(Value::Array(Vec::new()))
    }
}
