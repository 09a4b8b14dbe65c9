//! Photo search and provider collection HTTP handlers.
//!
//! ```text
//! GET /api/v1/photos/search?query=lighthouse&page=1&perPage=20
//! GET /api/v1/photos/{id}
//! GET /api/v1/unsplash/collections/{id}
//! GET /api/v1/unsplash/collections/{id}/photos?page=1&perPage=20&orientation=landscape
//! ```
//!
//! Provider payloads are passed through as JSON. These routes are public.

use actix_web::{get, web};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Error, Orientation, PhotoPage, PhotoSearchPage};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/v1/photos/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPhotosQuery {
    pub query: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Query string for `GET /api/v1/unsplash/collections/{id}/photos`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPhotosQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub orientation: Option<String>,
}

fn parse_orientation(raw: Option<String>) -> Result<Option<Orientation>, Error> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| value.parse())
        .transpose()
}

/// Search provider photos. A blank query yields an empty page.
#[utoipa::path(
    get,
    path = "/api/v1/photos/search",
    params(
        ("query" = Option<String>, Query, description = "Search text"),
        ("page" = Option<u32>, Query, description = "Page number, default 1"),
        ("perPage" = Option<u32>, Query, description = "Page size, default 20, max 30")
    ),
    responses(
        (status = 200, description = "Search results", body = PhotoSearchPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Provider unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["photos"],
    operation_id = "searchPhotos",
    security([])
)]
#[get("/photos/search")]
pub async fn search_photos(
    state: web::Data<HttpState>,
    query: web::Query<SearchPhotosQuery>,
) -> ApiResult<web::Json<PhotoSearchPage>> {
    let SearchPhotosQuery {
        query,
        page,
        per_page,
    } = query.into_inner();
    let page = PhotoPage::new(page, per_page)?;
    let results = state
        .photos
        .search_photos(query.as_deref().unwrap_or_default(), page)
        .await?;
    Ok(web::Json(results))
}

/// One provider photo.
#[utoipa::path(
    get,
    path = "/api/v1/photos/{id}",
    params(("id" = String, Path, description = "Provider photo id")),
    responses(
        (status = 200, description = "Photo metadata", body = serde_json::Value),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Provider unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["photos"],
    operation_id = "getPhoto",
    security([])
)]
#[get("/photos/{id}")]
pub async fn get_photo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    let id = path.into_inner();
    state
        .photos
        .photo_details(&id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("Photo {id} not found.")))
}

/// One provider collection.
#[utoipa::path(
    get,
    path = "/api/v1/unsplash/collections/{id}",
    params(("id" = String, Path, description = "Provider collection id")),
    responses(
        (status = 200, description = "Collection metadata", body = serde_json::Value),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Provider unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["photos"],
    operation_id = "getExternalCollection",
    security([])
)]
#[get("/unsplash/collections/{id}")]
pub async fn get_external_collection(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Value>> {
    let collection = state.photos.external_collection(&path).await?;
    Ok(web::Json(collection))
}

/// Photos of one provider collection.
#[utoipa::path(
    get,
    path = "/api/v1/unsplash/collections/{id}/photos",
    params(
        ("id" = String, Path, description = "Provider collection id"),
        ("page" = Option<u32>, Query, description = "Page number, default 1"),
        ("perPage" = Option<u32>, Query, description = "Page size, default 20, max 30"),
        ("orientation" = Option<Orientation>, Query, description = "landscape, portrait or squarish")
    ),
    responses(
        (status = 200, description = "Collection photos", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 503, description = "Provider unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["photos"],
    operation_id = "listExternalCollectionPhotos",
    security([])
)]
#[get("/unsplash/collections/{id}/photos")]
pub async fn list_external_collection_photos(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<CollectionPhotosQuery>,
) -> ApiResult<web::Json<Value>> {
    let CollectionPhotosQuery {
        page,
        per_page,
        orientation,
    } = query.into_inner();
    let page = PhotoPage::new(page, per_page)?;
    let orientation = parse_orientation(orientation)?;
    let photos = state
        .photos
        .external_collection_photos(&path, page, orientation)
        .await?;
    Ok(web::Json(photos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPhotoSearchQuery;
    use crate::inbound::http::test_utils::{fixture_ports, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Arc;

    fn app_with(
        photos: MockPhotoSearchQuery,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut ports = fixture_ports();
        ports.photos = Arc::new(photos);
        App::new()
            .app_data(web::Data::new(test_state(ports)))
            .service(
                web::scope("/api/v1")
                    .service(search_photos)
                    .service(get_photo)
                    .service(get_external_collection)
                    .service(list_external_collection_photos),
            )
    }

    #[actix_web::test]
    async fn search_uses_default_page_window() {
        let mut photos = MockPhotoSearchQuery::new();
        photos
            .expect_search_photos()
            .withf(|query, page| query == "lighthouse" && *page == PhotoPage::default())
            .times(1)
            .return_once(|_, _| {
                Ok(PhotoSearchPage {
                    photos: vec![json!({ "id": "Dwu85P9SOIk" })],
                    total_pages: 7,
                })
            });
        let app = actix_test::init_service(app_with(photos)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/photos/search?query=lighthouse")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({ "photos": [{ "id": "Dwu85P9SOIk" }], "totalPages": 7 })
        );
    }

    #[rstest]
    #[case::zero_page("/api/v1/photos/search?query=a&page=0")]
    #[case::oversized_page("/api/v1/photos/search?query=a&perPage=31")]
    #[case::bad_orientation("/api/v1/unsplash/collections/abc/photos?orientation=diagonal")]
    #[actix_web::test]
    async fn invalid_paging_is_rejected_before_the_provider(#[case] uri: &str) {
        let mut photos = MockPhotoSearchQuery::new();
        photos.expect_search_photos().never();
        photos.expect_external_collection_photos().never();
        let app = actix_test::init_service(app_with(photos)).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_photo_is_not_found() {
        let mut photos = MockPhotoSearchQuery::new();
        photos
            .expect_photo_details()
            .with(eq("gone"))
            .times(1)
            .return_once(|_| Ok(None));
        let app = actix_test::init_service(app_with(photos)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/photos/gone")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn collection_photos_forward_orientation() {
        let mut photos = MockPhotoSearchQuery::new();
        photos
            .expect_external_collection_photos()
            .withf(|id, page, orientation| {
                id == "abc"
                    && page.page() == 2
                    && page.per_page() == 10
                    && *orientation == Some(Orientation::Portrait)
            })
            .times(1)
            .return_once(|_, _, _| Ok(json!([{ "id": "p1" }])));
        let app = actix_test::init_service(app_with(photos)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/unsplash/collections/abc/photos?page=2&perPage=10&orientation=portrait")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!([{ "id": "p1" }]));
    }

    #[actix_web::test]
    async fn provider_outage_is_service_unavailable() {
        let mut photos = MockPhotoSearchQuery::new();
        photos
            .expect_external_collection()
            .times(1)
            .return_once(|_| Err(Error::service_unavailable("Unsplash is unavailable.")));
        let app = actix_test::init_service(app_with(photos)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/unsplash/collections/abc")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
