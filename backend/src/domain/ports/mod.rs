//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are what inbound adapters call.
//! Driven ports (`*Repository`, `*Source`) are what the domain calls and
//! outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod collection_repository;
mod collections_command;
mod collections_query;
mod identity_sync_command;
mod photo_search_query;
mod photo_source;
mod user_repository;

#[cfg(test)]
pub use collection_repository::MockCollectionRepository;
pub use collection_repository::{
    CollectionRepository, CollectionRepositoryError, FixtureCollectionRepository,
};
#[cfg(test)]
pub use collections_command::MockCollectionsCommand;
pub use collections_command::{AddImageRequest, CollectionsCommand, FixtureCollectionsCommand};
#[cfg(test)]
pub use collections_query::MockCollectionsQuery;
pub use collections_query::{CollectionsQuery, FixtureCollectionsQuery};
#[cfg(test)]
pub use identity_sync_command::MockIdentitySyncCommand;
pub use identity_sync_command::{FixtureIdentitySyncCommand, IdentitySyncCommand, SyncOutcome};
#[cfg(test)]
pub use photo_search_query::MockPhotoSearchQuery;
pub use photo_search_query::{FixturePhotoSearchQuery, PhotoSearchQuery};
#[cfg(test)]
pub use photo_source::MockPhotoSource;
pub use photo_source::{FixturePhotoSource, PhotoSource, PhotoSourceError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
