//! Driving port for collection lifecycle changes made by their owner.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AuthContext, Collection, CollectionId, CollectionName, Error, ImageId};

/// Request to file an image in a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct AddImageRequest {
    pub collection_id: CollectionId,
    pub image_id: ImageId,
    /// Provider metadata recorded when the image is first seen.
    pub metadata: Value,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionsCommand: Send + Sync {
    /// Create a collection owned by the caller.
    async fn create_collection(
        &self,
        auth: &AuthContext,
        name: CollectionName,
    ) -> Result<Collection, Error>;

    /// Rename one of the caller's collections.
    async fn rename_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
        name: CollectionName,
    ) -> Result<Collection, Error>;

    /// Delete one of the caller's collections together with its links.
    async fn delete_collection(&self, auth: &AuthContext, id: &CollectionId) -> Result<(), Error>;

    /// Link an image to one of the caller's collections.
    async fn add_image_to_collection(
        &self,
        auth: &AuthContext,
        request: AddImageRequest,
    ) -> Result<(), Error>;

    /// Unlink an image from one of the caller's collections.
    async fn remove_image_from_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
        image_id: &ImageId,
    ) -> Result<(), Error>;
}

/// Fixture command that rejects every change as if the collection were absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCollectionsCommand;

#[async_trait]
impl CollectionsCommand for FixtureCollectionsCommand {
    async fn create_collection(
        &self,
        auth: &AuthContext,
        _name: CollectionName,
    ) -> Result<Collection, Error> {
        auth.require_user()?;
        Err(Error::service_unavailable("collections are not configured"))
    }

    async fn rename_collection(
        &self,
        auth: &AuthContext,
        _id: &CollectionId,
        _name: CollectionName,
    ) -> Result<Collection, Error> {
        auth.require_user()?;
        Err(Error::not_found(crate::domain::COLLECTION_NOT_FOUND))
    }

    async fn delete_collection(&self, auth: &AuthContext, _id: &CollectionId) -> Result<(), Error> {
        auth.require_user()?;
        Err(Error::not_found(crate::domain::COLLECTION_NOT_FOUND))
    }

    async fn add_image_to_collection(
        &self,
        auth: &AuthContext,
        _request: AddImageRequest,
    ) -> Result<(), Error> {
        auth.require_user()?;
        Err(Error::not_found(crate::domain::COLLECTION_NOT_FOUND))
    }

    async fn remove_image_from_collection(
        &self,
        auth: &AuthContext,
        _id: &CollectionId,
        _image_id: &ImageId,
    ) -> Result<(), Error> {
        auth.require_user()?;
        Err(Error::not_found(crate::domain::COLLECTION_NOT_FOUND))
    }
}
