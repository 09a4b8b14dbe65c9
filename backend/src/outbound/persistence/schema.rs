//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Users mirrored from the identity provider.
    users (id) {
        /// Provider subject id; never generated locally.
        id -> Text,
        /// Primary email address as last reported by the provider.
        email -> Text,
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-owned image collections.
    collections (id) {
        id -> Uuid,
        /// Owner; deleting the user deletes their collections.
        user_id -> Text,
        name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Images saved from the photo provider.
    images (id) {
        /// Provider photo id.
        id -> Text,
        /// Provider metadata captured on first save.
        metadata -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Many-to-many links between collections and images.
    collection_images (collection_id, image_id) {
        collection_id -> Uuid,
        image_id -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(collections -> users (user_id));
diesel::joinable!(collection_images -> collections (collection_id));
diesel::joinable!(collection_images -> images (image_id));

diesel::allow_tables_to_appear_in_same_query!(users, collections, images, collection_images);
