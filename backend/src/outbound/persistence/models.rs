//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{collection_images, collections, images, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
}

/// Insertable struct for new users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub email: &'a str,
}

/// Changeset applied by identity update events.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserEmailUpdate<'a> {
    pub email: &'a str,
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// Row struct for reading from the collections table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollectionRow {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new collections.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collections)]
pub(crate) struct NewCollectionRow<'a> {
    pub id: Uuid,
    pub user_id: &'a str,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Row struct for reading from the images table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = images)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ImageRow {
    pub id: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new images.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = images)]
pub(crate) struct NewImageRow<'a> {
    pub id: &'a str,
    pub metadata: &'a serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for collection/image links.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collection_images)]
pub(crate) struct NewCollectionImageRow<'a> {
    pub collection_id: Uuid,
    pub image_id: &'a str,
}
