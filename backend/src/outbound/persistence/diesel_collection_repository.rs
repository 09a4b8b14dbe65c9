//! PostgreSQL-backed `CollectionRepository` implementation using Diesel ORM.
//!
//! Ownership is always part of the `WHERE` clause. Link membership filters
//! ("contains image" / "does not contain image") are `IN` / `NOT IN`
//! subselects over `collection_images`, AND-ed with the owner predicate.

use async_trait::async_trait;
use diesel::dsl::not;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CollectionRepository, CollectionRepositoryError};
use crate::domain::{Collection, CollectionId, CollectionName, Image, ImageId, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CollectionRow, ImageRow, NewCollectionImageRow, NewCollectionRow, NewImageRow};
use super::pool::{DbPool, PoolError};
use super::schema::{collection_images, collections, images};

/// Diesel-backed implementation of the collection repository port.
#[derive(Clone)]
pub struct DieselCollectionRepository {
    pool: DbPool,
}

impl DieselCollectionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CollectionRepositoryError {
    map_basic_pool_error(error, CollectionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CollectionRepositoryError {
    map_basic_diesel_error(
        error,
        CollectionRepositoryError::query,
        CollectionRepositoryError::connection,
    )
}

fn row_to_collection(row: CollectionRow) -> Result<Collection, CollectionRepositoryError> {
    let CollectionRow {
        id,
        user_id,
        name,
        created_at,
    } = row;
    let invalid = |err: &dyn std::fmt::Display| {
        CollectionRepositoryError::query(format!("stored collection {id} is invalid: {err}"))
    };
    Ok(Collection {
        id: CollectionId::new(id),
        user_id: UserId::new(user_id).map_err(|err| invalid(&err))?,
        name: CollectionName::new(name).map_err(|err| invalid(&err))?,
        created_at,
    })
}

fn rows_to_collections(
    rows: Vec<CollectionRow>,
) -> Result<Vec<Collection>, CollectionRepositoryError> {
    rows.into_iter().map(row_to_collection).collect()
}

fn row_to_image(row: ImageRow) -> Result<Image, CollectionRepositoryError> {
    let ImageRow {
        id,
        metadata,
        created_at,
    } = row;
    let id = ImageId::new(&id).map_err(|err| {
        CollectionRepositoryError::query(format!("stored image {id} is invalid: {err}"))
    })?;
    Ok(Image {
        id,
        metadata,
        created_at,
    })
}

/// Build an `ILIKE` pattern matching `search` as a literal substring.
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl CollectionRepository for DieselCollectionRepository {
    async fn list_for_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = collections::table
            .filter(collections::user_id.eq(owner.as_ref()))
            .order((collections::created_at.desc(), collections::id.desc()))
            .select(CollectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_collections(rows)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: &CollectionId,
    ) -> Result<Option<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = collections::table
            .filter(collections::id.eq(id.as_uuid()))
            .filter(collections::user_id.eq(owner.as_ref()))
            .select(CollectionRow::as_select())
            .first::<CollectionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_collection).transpose()
    }

    async fn list_images(
        &self,
        id: &CollectionId,
    ) -> Result<Vec<Image>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let linked = collection_images::table
            .filter(collection_images::collection_id.eq(id.as_uuid()))
            .select(collection_images::image_id);
        let rows = images::table
            .filter(images::id.eq_any(linked))
            .order((images::created_at.desc(), images::id.asc()))
            .select(ImageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_image).collect()
    }

    async fn list_containing_image(
        &self,
        owner: &UserId,
        image_id: &ImageId,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let linking = collection_images::table
            .filter(collection_images::image_id.eq(image_id.as_ref()))
            .select(collection_images::collection_id);
        let rows = collections::table
            .filter(collections::user_id.eq(owner.as_ref()))
            .filter(collections::id.eq_any(linking))
            .order((collections::created_at.desc(), collections::id.desc()))
            .select(CollectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_collections(rows)
    }

    async fn list_available_for_image(
        &self,
        owner: &UserId,
        image_id: &ImageId,
        search: Option<String>,
    ) -> Result<Vec<Collection>, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let linking = collection_images::table
            .filter(collection_images::image_id.eq(image_id.as_ref()))
            .select(collection_images::collection_id);
        let mut query = collections::table
            .filter(collections::user_id.eq(owner.as_ref()))
            .filter(not(collections::id.eq_any(linking)))
            .into_boxed();
        if let Some(search) = search.as_deref() {
            query = query.filter(collections::name.ilike(contains_pattern(search)));
        }

        let rows = query
            .order((collections::name.asc(), collections::id.asc()))
            .select(CollectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_collections(rows)
    }

    async fn create(&self, collection: &Collection) -> Result<(), CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCollectionRow {
            id: *collection.id.as_uuid(),
            user_id: collection.user_id.as_ref(),
            name: collection.name.as_ref(),
            created_at: collection.created_at,
        };

        diesel::insert_into(collections::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn rename(
        &self,
        owner: &UserId,
        id: &CollectionId,
        name: &CollectionName,
    ) -> Result<bool, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            collections::table
                .filter(collections::id.eq(id.as_uuid()))
                .filter(collections::user_id.eq(owner.as_ref())),
        )
        .set(collections::name.eq(name.as_ref()))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: &CollectionId,
    ) -> Result<bool, CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            collections::table
                .filter(collections::id.eq(id.as_uuid()))
                .filter(collections::user_id.eq(owner.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn save_image(&self, image: &Image) -> Result<(), CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewImageRow {
            id: image.id.as_ref(),
            metadata: &image.metadata,
            created_at: image.created_at,
        };

        diesel::insert_into(images::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn link_image(
        &self,
        id: &CollectionId,
        image_id: &ImageId,
    ) -> Result<(), CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCollectionImageRow {
            collection_id: *id.as_uuid(),
            image_id: image_id.as_ref(),
        };

        diesel::insert_into(collection_images::table)
            .values(&row)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn unlink_image(
        &self,
        id: &CollectionId,
        image_id: &ImageId,
    ) -> Result<(), CollectionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(
            collection_images::table
                .filter(collection_images::collection_id.eq(id.as_uuid()))
                .filter(collection_images::image_id.eq(image_id.as_ref())),
        )
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(map_diesel_error)
    }
}
