//! Builders for HTTP state ports and repository-backed service pairs.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use gallery::domain::ports::{
    CollectionsCommand, CollectionsQuery, FixtureCollectionsCommand, FixtureCollectionsQuery,
    FixtureIdentitySyncCommand, FixturePhotoSource, IdentitySyncCommand, PhotoSearchQuery,
};
use gallery::domain::{CollectionsService, IdentitySyncService, PhotoSearchService};
use gallery::inbound::http::state::{HttpState, HttpStatePorts};
use gallery::outbound::persistence::{DbPool, DieselCollectionRepository, DieselUserRepository};

use super::ServerConfig;

/// Build a command/query service pair using the real service when a pool is
/// available, otherwise using fixture implementations.
fn build_service_pair<Pool, S, Cmd, Query, MakeService, Cast>(
    pool: &Option<Pool>,
    make_service: MakeService,
    fixtures: (Arc<Cmd>, Arc<Query>),
    cast: Cast,
) -> (Arc<Cmd>, Arc<Query>)
where
    S: 'static,
    Cmd: ?Sized + 'static,
    Query: ?Sized + 'static,
    MakeService: FnOnce(&Pool) -> S,
    Cast: FnOnce(Arc<S>) -> (Arc<Cmd>, Arc<Query>),
{
    match pool {
        Some(pool) => {
            let service = Arc::new(make_service(pool));
            cast(service)
        }
        None => fixtures,
    }
}

fn build_collections_pair_with_pool<Pool, Service>(
    pool: &Option<Pool>,
    make_service: impl FnOnce(&Pool) -> Service,
) -> (Arc<dyn CollectionsCommand>, Arc<dyn CollectionsQuery>)
where
    Service: CollectionsCommand + CollectionsQuery + 'static,
{
    build_service_pair(
        pool,
        make_service,
        (
            Arc::new(FixtureCollectionsCommand) as Arc<dyn CollectionsCommand>,
            Arc::new(FixtureCollectionsQuery) as Arc<dyn CollectionsQuery>,
        ),
        |service| {
            (
                service.clone() as Arc<dyn CollectionsCommand>,
                service as Arc<dyn CollectionsQuery>,
            )
        },
    )
}

fn build_collections_pair(
    config: &ServerConfig,
) -> (Arc<dyn CollectionsCommand>, Arc<dyn CollectionsQuery>) {
    build_collections_pair_with_pool(&config.db_pool, |pool: &DbPool| {
        CollectionsService::new(
            Arc::new(DieselCollectionRepository::new(pool.clone())),
            Arc::new(DefaultClock),
        )
    })
}

fn build_identity_sync(config: &ServerConfig) -> Arc<dyn IdentitySyncCommand> {
    match &config.db_pool {
        Some(pool) => Arc::new(IdentitySyncService::new(Arc::new(
            DieselUserRepository::new(pool.clone()),
        ))),
        None => Arc::new(FixtureIdentitySyncCommand),
    }
}

fn build_photo_search(config: &ServerConfig) -> Arc<dyn PhotoSearchQuery> {
    match &config.photo_source {
        Some(source) => Arc::new(PhotoSearchService::new(source.clone())),
        None => Arc::new(PhotoSearchService::new(Arc::new(FixturePhotoSource))),
    }
}

/// Build the shared HTTP state from configured adapters and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (collections, collections_query) = build_collections_pair(config);

    web::Data::new(HttpState::new(
        HttpStatePorts {
            identity_sync: build_identity_sync(config),
            collections,
            collections_query,
            photos: build_photo_search(config),
        },
        config.webhook_verifier.clone(),
    ))
}
