//! Collection and image membership HTTP handlers.
//!
//! ```text
//! GET    /api/v1/collections
//! POST   /api/v1/collections {"name":"Holidays"}
//! GET    /api/v1/collections/{id}
//! PATCH  /api/v1/collections/{id} {"name":"Trips"}
//! DELETE /api/v1/collections/{id}
//! GET    /api/v1/collections/{id}/images
//! PUT    /api/v1/collections/{id}/images/{imageId}
//! DELETE /api/v1/collections/{id}/images/{imageId}
//! GET    /api/v1/images/{imageId}/collections
//! GET    /api/v1/images/{imageId}/available-collections?search=
//! ```
//!
//! Every handler forwards the caller's [`AuthContext`]; ownership is enforced
//! by the driving ports, never here.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::ports::AddImageRequest;
use crate::domain::{AuthContext, COLLECTION_NOT_FOUND, Collection, Error, Image};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_collection_id, parse_collection_name, parse_image_id,
};

const ID: FieldName = FieldName::new("id");
const IMAGE_ID: FieldName = FieldName::new("imageId");
const NAME: FieldName = FieldName::new("name");

/// Request body for creating or renaming a collection.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionNameBody {
    #[schema(example = "Holidays")]
    pub name: String,
}

/// Optional body for filing an image.
///
/// The metadata is stored the first time an image is seen and left untouched
/// afterwards.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddImageBody {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub metadata: Option<Value>,
}

/// Query string for the "add to collection" picker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableCollectionsQuery {
    pub search: Option<String>,
}

/// List the caller's collections, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/collections",
    responses(
        (status = 200, description = "Collections", body = [Collection]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "listCollections",
    security(("SessionCookie" = []))
)]
#[get("/collections")]
pub async fn list_collections(
    state: web::Data<HttpState>,
    auth: AuthContext,
) -> ApiResult<web::Json<Vec<Collection>>> {
    let collections = state.collections_query.list_collections(&auth).await?;
    Ok(web::Json(collections))
}

/// Create a collection owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/collections",
    request_body = CollectionNameBody,
    responses(
        (status = 201, description = "Collection created", body = Collection),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "createCollection",
    security(("SessionCookie" = []))
)]
#[post("/collections")]
pub async fn create_collection(
    state: web::Data<HttpState>,
    auth: AuthContext,
    payload: web::Json<CollectionNameBody>,
) -> ApiResult<HttpResponse> {
    auth.require_user()?;
    let name = parse_collection_name(&payload.name, NAME)?;
    let collection = state.collections.create_collection(&auth, name).await?;
    Ok(HttpResponse::Created().json(collection))
}

/// Fetch one of the caller's collections.
///
/// Someone else's collection answers exactly like a missing one.
#[utoipa::path(
    get,
    path = "/api/v1/collections/{id}",
    params(("id" = String, Path, description = "Collection id")),
    responses(
        (status = 200, description = "Collection", body = Collection),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "getCollection",
    security(("SessionCookie" = []))
)]
#[get("/collections/{id}")]
pub async fn get_collection(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Collection>> {
    let id = parse_collection_id(&path, ID)?;
    state
        .collections_query
        .get_collection(&auth, &id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(COLLECTION_NOT_FOUND))
}

/// Rename one of the caller's collections.
#[utoipa::path(
    patch,
    path = "/api/v1/collections/{id}",
    params(("id" = String, Path, description = "Collection id")),
    request_body = CollectionNameBody,
    responses(
        (status = 200, description = "Collection renamed", body = Collection),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "renameCollection",
    security(("SessionCookie" = []))
)]
#[patch("/collections/{id}")]
pub async fn rename_collection(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    payload: web::Json<CollectionNameBody>,
) -> ApiResult<web::Json<Collection>> {
    auth.require_user()?;
    let id = parse_collection_id(&path, ID)?;
    let name = parse_collection_name(&payload.name, NAME)?;
    let collection = state
        .collections
        .rename_collection(&auth, &id, name)
        .await?;
    Ok(web::Json(collection))
}

/// Delete one of the caller's collections; images stay in the library.
#[utoipa::path(
    delete,
    path = "/api/v1/collections/{id}",
    params(("id" = String, Path, description = "Collection id")),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "deleteCollection",
    security(("SessionCookie" = []))
)]
#[delete("/collections/{id}")]
pub async fn delete_collection(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_collection_id(&path, ID)?;
    state.collections.delete_collection(&auth, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Images filed in one of the caller's collections, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/collections/{id}/images",
    params(("id" = String, Path, description = "Collection id")),
    responses(
        (status = 200, description = "Images", body = [Image]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "listCollectionImages",
    security(("SessionCookie" = []))
)]
#[get("/collections/{id}/images")]
pub async fn list_collection_images(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Image>>> {
    let id = parse_collection_id(&path, ID)?;
    let images = state
        .collections_query
        .list_images_in_collection(&auth, &id)
        .await?;
    Ok(web::Json(images))
}

/// File an image in one of the caller's collections. Idempotent.
#[utoipa::path(
    put,
    path = "/api/v1/collections/{id}/images/{imageId}",
    params(
        ("id" = String, Path, description = "Collection id"),
        ("imageId" = String, Path, description = "Provider image id")
    ),
    request_body(content = AddImageBody, description = "Optional provider metadata"),
    responses(
        (status = 204, description = "Image filed"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "addImageToCollection",
    security(("SessionCookie" = []))
)]
#[put("/collections/{id}/images/{image_id}")]
pub async fn add_image_to_collection(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<(String, String)>,
    payload: Option<web::Json<AddImageBody>>,
) -> ApiResult<HttpResponse> {
    let (raw_id, raw_image_id) = path.into_inner();
    let collection_id = parse_collection_id(&raw_id, ID)?;
    let image_id = parse_image_id(&raw_image_id, IMAGE_ID)?;
    let metadata = payload
        .and_then(|body| body.into_inner().metadata)
        .unwrap_or_else(|| Value::Object(Map::new()));
    state
        .collections
        .add_image_to_collection(
            &auth,
            AddImageRequest {
                collection_id,
                image_id,
                metadata,
            },
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Unfile an image from one of the caller's collections. Idempotent.
#[utoipa::path(
    delete,
    path = "/api/v1/collections/{id}/images/{imageId}",
    params(
        ("id" = String, Path, description = "Collection id"),
        ("imageId" = String, Path, description = "Provider image id")
    ),
    responses(
        (status = 204, description = "Image unfiled"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "removeImageFromCollection",
    security(("SessionCookie" = []))
)]
#[delete("/collections/{id}/images/{image_id}")]
pub async fn remove_image_from_collection(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_id, raw_image_id) = path.into_inner();
    let collection_id = parse_collection_id(&raw_id, ID)?;
    let image_id = parse_image_id(&raw_image_id, IMAGE_ID)?;
    state
        .collections
        .remove_image_from_collection(&auth, &collection_id, &image_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The caller's collections that already contain an image.
///
/// Anonymous callers get an empty list rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/images/{imageId}/collections",
    params(("imageId" = String, Path, description = "Provider image id")),
    responses(
        (status = 200, description = "Collections containing the image", body = [Collection]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "listCollectionsForImage",
    security(("SessionCookie" = []), ())
)]
#[get("/images/{image_id}/collections")]
pub async fn list_collections_for_image(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Collection>>> {
    let image_id = parse_image_id(&path, IMAGE_ID)?;
    let collections = state
        .collections_query
        .list_collections_containing_image(&auth, &image_id)
        .await?;
    Ok(web::Json(collections))
}

/// The caller's collections an image could still be filed in, by name.
#[utoipa::path(
    get,
    path = "/api/v1/images/{imageId}/available-collections",
    params(
        ("imageId" = String, Path, description = "Provider image id"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring of the collection name")
    ),
    responses(
        (status = 200, description = "Collections not containing the image", body = [Collection]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["collections"],
    operation_id = "listAvailableCollectionsForImage",
    security(("SessionCookie" = []), ())
)]
#[get("/images/{image_id}/available-collections")]
pub async fn list_available_collections_for_image(
    state: web::Data<HttpState>,
    auth: AuthContext,
    path: web::Path<String>,
    query: web::Query<AvailableCollectionsQuery>,
) -> ApiResult<web::Json<Vec<Collection>>> {
    let image_id = parse_image_id(&path, IMAGE_ID)?;
    let AvailableCollectionsQuery { search } = query.into_inner();
    let collections = state
        .collections_query
        .list_collections_available_for_image(&auth, &image_id, search)
        .await?;
    Ok(web::Json(collections))
}

#[cfg(test)]
#[path = "collections_tests.rs"]
mod tests;
