//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use gallery::Trace;
#[cfg(debug_assertions)]
use gallery::doc::ApiDoc;
use gallery::inbound::http::collections::{
    add_image_to_collection, create_collection, delete_collection, get_collection,
    list_available_collections_for_image, list_collection_images, list_collections,
    list_collections_for_image, remove_image_from_collection, rename_collection,
};
use gallery::inbound::http::error::{json_config, query_config};
use gallery::inbound::http::health::{HealthState, live, ready};
use gallery::inbound::http::photos::{
    get_external_collection, get_photo, list_external_collection_photos, search_photos,
};
use gallery::inbound::http::state::HttpState;
use gallery::inbound::http::webhooks::receive_identity_webhook;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    // `/photos/search` must be registered ahead of `/photos/{id}`.
    let api = web::scope("/api/v1")
        .wrap(session)
        .service(list_collections)
        .service(create_collection)
        .service(get_collection)
        .service(rename_collection)
        .service(delete_collection)
        .service(list_collection_images)
        .service(add_image_to_collection)
        .service(remove_image_from_collection)
        .service(list_collections_for_image)
        .service(list_available_collections_for_image)
        .service(search_photos)
        .service(get_photo)
        .service(get_external_collection)
        .service(list_external_collection_photos);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(receive_identity_webhook)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] carrying the session policy, the
///   webhook verifier, and the optional database pool and photo source.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
