//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP endpoint, the domain payloads they
//! exchange, and the session cookie security scheme. The document backs the
//! Swagger UI in debug builds and is printed by `openapi-dump` for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Collection, Error, ErrorCode, Image, Orientation, PhotoSearchPage};
use crate::inbound::http::collections::{AddImageBody, CollectionNameBody};
use crate::inbound::http::webhooks::WebhookAck;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie written by the identity front door.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gallery backend API",
        description = "Identity webhooks, private image collections, and photo search.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::webhooks::receive_identity_webhook,
        crate::inbound::http::collections::list_collections,
        crate::inbound::http::collections::create_collection,
        crate::inbound::http::collections::get_collection,
        crate::inbound::http::collections::rename_collection,
        crate::inbound::http::collections::delete_collection,
        crate::inbound::http::collections::list_collection_images,
        crate::inbound::http::collections::add_image_to_collection,
        crate::inbound::http::collections::remove_image_from_collection,
        crate::inbound::http::collections::list_collections_for_image,
        crate::inbound::http::collections::list_available_collections_for_image,
        crate::inbound::http::photos::search_photos,
        crate::inbound::http::photos::get_photo,
        crate::inbound::http::photos::get_external_collection,
        crate::inbound::http::photos::list_external_collection_photos,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Collection,
        Image,
        PhotoSearchPage,
        Orientation,
        WebhookAck,
        CollectionNameBody,
        AddImageBody
    )),
    tags(
        (name = "webhooks", description = "Identity provider deliveries"),
        (name = "collections", description = "Private collections of saved images"),
        (name = "photos", description = "Photo provider gateway"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
