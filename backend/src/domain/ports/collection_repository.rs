//! Driven port for collection and image storage.
//!
//! Every method that touches a collection takes the owner and filters by it.
//! The only exceptions are the image link operations, which the domain calls
//! after it has confirmed ownership with [`CollectionRepository::find_owned`].

use async_trait::async_trait;

use crate::domain::{Collection, CollectionId, CollectionName, Image, ImageId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by collection repository adapters.
    pub enum CollectionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "collection repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "collection repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Collections owned by `owner`, newest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError>;

    /// The collection when it exists and belongs to `owner`.
    async fn find_owned(
        &self,
        owner: &UserId,
        id: &CollectionId,
    ) -> Result<Option<Collection>, CollectionRepositoryError>;

    /// Images linked to a collection, newest first.
    async fn list_images(&self, id: &CollectionId)
    -> Result<Vec<Image>, CollectionRepositoryError>;

    /// Collections of `owner` that link `image_id`.
    async fn list_containing_image(
        &self,
        owner: &UserId,
        image_id: &ImageId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError>;

    /// Collections of `owner` that do not link `image_id`, ordered by name,
    /// optionally restricted to names containing `search` case-insensitively.
    async fn list_available_for_image(
        &self,
        owner: &UserId,
        image_id: &ImageId,
        search: Option<String>,
    ) -> Result<Vec<Collection>, CollectionRepositoryError>;

    /// Insert a new collection.
    async fn create(&self, collection: &Collection) -> Result<(), CollectionRepositoryError>;

    /// Rename a collection of `owner`; `false` when nothing matched.
    async fn rename(
        &self,
        owner: &UserId,
        id: &CollectionId,
        name: &CollectionName,
    ) -> Result<bool, CollectionRepositoryError>;

    /// Delete a collection of `owner`; `false` when nothing matched.
    async fn delete(
        &self,
        owner: &UserId,
        id: &CollectionId,
    ) -> Result<bool, CollectionRepositoryError>;

    /// Record an image unless one with the same id already exists.
    async fn save_image(&self, image: &Image) -> Result<(), CollectionRepositoryError>;

    /// Link an image to a collection; linking twice is a no-op.
    async fn link_image(
        &self,
        id: &CollectionId,
        image_id: &ImageId,
    ) -> Result<(), CollectionRepositoryError>;

    /// Remove a link; removing a missing link is a no-op.
    async fn unlink_image(
        &self,
        id: &CollectionId,
        image_id: &ImageId,
    ) -> Result<(), CollectionRepositoryError>;
}

/// Fixture repository for tests that do not exercise collection storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCollectionRepository;

#[async_trait]
impl CollectionRepository for FixtureCollectionRepository {
    async fn list_for_owner(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_owned(
        &self,
        _owner: &UserId,
        _id: &CollectionId,
    ) -> Result<Option<Collection>, CollectionRepositoryError> {
        Ok(None)
    }

    async fn list_images(
        &self,
        _id: &CollectionId,
    ) -> Result<Vec<Image>, CollectionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_containing_image(
        &self,
        _owner: &UserId,
        _image_id: &ImageId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_available_for_image(
        &self,
        _owner: &UserId,
        _image_id: &ImageId,
        _search: Option<String>,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, _collection: &Collection) -> Result<(), CollectionRepositoryError> {
        Ok(())
    }

    async fn rename(
        &self,
        _owner: &UserId,
        _id: &CollectionId,
        _name: &CollectionName,
    ) -> Result<bool, CollectionRepositoryError> {
        Ok(false)
    }

    async fn delete(
        &self,
        _owner: &UserId,
        _id: &CollectionId,
    ) -> Result<bool, CollectionRepositoryError> {
        Ok(false)
    }

    async fn save_image(&self, _image: &Image) -> Result<(), CollectionRepositoryError> {
        Ok(())
    }

    async fn link_image(
        &self,
        _id: &CollectionId,
        _image_id: &ImageId,
    ) -> Result<(), CollectionRepositoryError> {
        Ok(())
    }

    async fn unlink_image(
        &self,
        _id: &CollectionId,
        _image_id: &ImageId,
    ) -> Result<(), CollectionRepositoryError> {
        Ok(())
    }
}
