//! Driving port for ownership-scoped collection reads.
//!
//! Inbound adapters pass the caller explicitly; implementations must scope
//! every result to that caller.

use async_trait::async_trait;

use crate::domain::{AuthContext, Collection, CollectionId, Error, Image, ImageId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionsQuery: Send + Sync {
    /// The caller's collections, newest first. Anonymous callers are rejected.
    async fn list_collections(&self, auth: &AuthContext) -> Result<Vec<Collection>, Error>;

    /// One of the caller's collections. Someone else's collection is reported
    /// exactly like a missing one.
    async fn get_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
    ) -> Result<Option<Collection>, Error>;

    /// Images in one of the caller's collections, newest first.
    async fn list_images_in_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
    ) -> Result<Vec<Image>, Error>;

    /// The caller's collections linking an image; empty for anonymous callers.
    async fn list_collections_containing_image(
        &self,
        auth: &AuthContext,
        image_id: &ImageId,
    ) -> Result<Vec<Collection>, Error>;

    /// The caller's collections not yet linking an image, by name; empty for
    /// anonymous callers.
    async fn list_collections_available_for_image(
        &self,
        auth: &AuthContext,
        image_id: &ImageId,
        search: Option<String>,
    ) -> Result<Vec<Collection>, Error>;
}

/// Fixture query that owns nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCollectionsQuery;

#[async_trait]
impl CollectionsQuery for FixtureCollectionsQuery {
    async fn list_collections(&self, auth: &AuthContext) -> Result<Vec<Collection>, Error> {
        auth.require_user()?;
        Ok(Vec::new())
    }

    async fn get_collection(
        &self,
        auth: &AuthContext,
        _id: &CollectionId,
    ) -> Result<Option<Collection>, Error> {
        auth.require_user()?;
        Ok(None)
    }

    async fn list_images_in_collection(
        &self,
        auth: &AuthContext,
        _id: &CollectionId,
    ) -> Result<Vec<Image>, Error> {
        auth.require_user()?;
        Err(Error::not_found(crate::domain::COLLECTION_NOT_FOUND))
    }

    async fn list_collections_containing_image(
        &self,
        _auth: &AuthContext,
        _image_id: &ImageId,
    ) -> Result<Vec<Collection>, Error> {
        Ok(Vec::new())
    }

    async fn list_collections_available_for_image(
        &self,
        _auth: &AuthContext,
        _image_id: &ImageId,
        _search: Option<String>,
    ) -> Result<Vec<Collection>, Error> {
        Ok(Vec::new())
    }
}
