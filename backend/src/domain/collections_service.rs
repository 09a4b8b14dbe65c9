//! Ownership-scoped collection service.
//!
//! Implements both collection driving ports. Each operation resolves the
//! caller from the [`AuthContext`] first and passes it to the repository, so
//! no query can run unscoped. Storage failures are logged with their cause
//! and surfaced with a fixed per-operation message.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    AddImageRequest, CollectionRepository, CollectionRepositoryError, CollectionsCommand,
    CollectionsQuery,
};
use crate::domain::{
    AuthContext, COLLECTION_NOT_FOUND, Collection, CollectionId, CollectionName, Error, Image,
    ImageId,
};

const LIST_FAILED: &str = "Failed to fetch collections.";
const DETAILS_FAILED: &str = "Failed to fetch collection details.";
const IMAGES_FAILED: &str = "Failed to fetch images in collection.";
const CONTAINING_FAILED: &str = "Failed to fetch collections for the image.";
const AVAILABLE_FAILED: &str = "Failed to fetch available collections.";
const CREATE_FAILED: &str = "Failed to create collection.";
const RENAME_FAILED: &str = "Failed to rename collection.";
const DELETE_FAILED: &str = "Failed to delete collection.";
const ADD_IMAGE_FAILED: &str = "Failed to add image to collection.";
const REMOVE_IMAGE_FAILED: &str = "Failed to remove image from collection.";

/// Collection service over a [`CollectionRepository`].
#[derive(Clone)]
pub struct CollectionsService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CollectionsService<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

/// Log the storage cause and replace it with `message`.
fn storage_failure(message: &'static str) -> impl FnOnce(CollectionRepositoryError) -> Error {
    move |cause| {
        error!(error = %cause, "{message}");
        match cause {
            CollectionRepositoryError::Connection { .. } => Error::service_unavailable(message),
            CollectionRepositoryError::Query { .. } => Error::internal(message),
        }
    }
}

/// Only the empty string means no name filter; whitespace is matched as typed.
fn normalise_search(search: Option<String>) -> Option<String> {
    search.filter(|text| !text.is_empty())
}

impl<R> CollectionsService<R>
where
    R: CollectionRepository,
{
    async fn require_owned(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
        failure: &'static str,
    ) -> Result<Collection, Error> {
        let owner = auth.require_user()?;
        self.repo
            .find_owned(owner, id)
            .await
            .map_err(storage_failure(failure))?
            .ok_or_else(|| {
                debug!(collection_id = %id, "collection absent or not owned by caller");
                Error::not_found(COLLECTION_NOT_FOUND)
            })
    }
}

#[async_trait]
impl<R> CollectionsQuery for CollectionsService<R>
where
    R: CollectionRepository,
{
    async fn list_collections(&self, auth: &AuthContext) -> Result<Vec<Collection>, Error> {
        let owner = auth.require_user()?;
        self.repo
            .list_for_owner(owner)
            .await
            .map_err(storage_failure(LIST_FAILED))
    }

    async fn get_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
    ) -> Result<Option<Collection>, Error> {
        let owner = auth.require_user()?;
        self.repo
            .find_owned(owner, id)
            .await
            .map_err(storage_failure(DETAILS_FAILED))
    }

    async fn list_images_in_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
    ) -> Result<Vec<Image>, Error> {
        self.require_owned(auth, id, IMAGES_FAILED).await?;
        self.repo
            .list_images(id)
            .await
            .map_err(storage_failure(IMAGES_FAILED))
    }

    async fn list_collections_containing_image(
        &self,
        auth: &AuthContext,
        image_id: &ImageId,
    ) -> Result<Vec<Collection>, Error> {
        let Some(owner) = auth.user_id() else {
            return Ok(Vec::new());
        };
        self.repo
            .list_containing_image(owner, image_id)
            .await
            .map_err(storage_failure(CONTAINING_FAILED))
    }

    async fn list_collections_available_for_image(
        &self,
        auth: &AuthContext,
        image_id: &ImageId,
        search: Option<String>,
    ) -> Result<Vec<Collection>, Error> {
        let Some(owner) = auth.user_id() else {
            return Ok(Vec::new());
        };
        self.repo
            .list_available_for_image(owner, image_id, normalise_search(search))
            .await
            .map_err(storage_failure(AVAILABLE_FAILED))
    }
}

#[async_trait]
impl<R> CollectionsCommand for CollectionsService<R>
where
    R: CollectionRepository,
{
    async fn create_collection(
        &self,
        auth: &AuthContext,
        name: CollectionName,
    ) -> Result<Collection, Error> {
        let owner = auth.require_user()?;
        let collection = Collection {
            id: CollectionId::random(),
            user_id: owner.clone(),
            name,
            created_at: self.clock.utc(),
        };
        self.repo
            .create(&collection)
            .await
            .map_err(storage_failure(CREATE_FAILED))?;
        Ok(collection)
    }

    async fn rename_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
        name: CollectionName,
    ) -> Result<Collection, Error> {
        let owner = auth.require_user()?;
        let renamed = self
            .repo
            .rename(owner, id, &name)
            .await
            .map_err(storage_failure(RENAME_FAILED))?;
        if !renamed {
            return Err(Error::not_found(COLLECTION_NOT_FOUND));
        }
        self.require_owned(auth, id, RENAME_FAILED).await
    }

    async fn delete_collection(&self, auth: &AuthContext, id: &CollectionId) -> Result<(), Error> {
        let owner = auth.require_user()?;
        let deleted = self
            .repo
            .delete(owner, id)
            .await
            .map_err(storage_failure(DELETE_FAILED))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(COLLECTION_NOT_FOUND))
        }
    }

    async fn add_image_to_collection(
        &self,
        auth: &AuthContext,
        request: AddImageRequest,
    ) -> Result<(), Error> {
        let AddImageRequest {
            collection_id,
            image_id,
            metadata,
        } = request;
        self.require_owned(auth, &collection_id, ADD_IMAGE_FAILED)
            .await?;
        let image = Image {
            id: image_id,
            metadata,
            created_at: self.clock.utc(),
        };
        self.repo
            .save_image(&image)
            .await
            .map_err(storage_failure(ADD_IMAGE_FAILED))?;
        self.repo
            .link_image(&collection_id, &image.id)
            .await
            .map_err(storage_failure(ADD_IMAGE_FAILED))
    }

    async fn remove_image_from_collection(
        &self,
        auth: &AuthContext,
        id: &CollectionId,
        image_id: &ImageId,
    ) -> Result<(), Error> {
        self.require_owned(auth, id, REMOVE_IMAGE_FAILED).await?;
        self.repo
            .unlink_image(id, image_id)
            .await
            .map_err(storage_failure(REMOVE_IMAGE_FAILED))
    }
}

#[cfg(test)]
#[path = "collections_service_tests.rs"]
mod tests;
