//! Photo search gateway service.
//!
//! Thin pass-through over a [`PhotoSource`]: it short-circuits blank input
//! and translates provider failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::ports::{PhotoSearchQuery, PhotoSource, PhotoSourceError};
use crate::domain::{Error, Orientation, PhotoPage, PhotoSearchPage};

const COLLECTION_ID_REQUIRED: &str = "Unsplash collection ID is required.";

/// Photo search service implementing [`PhotoSearchQuery`].
#[derive(Clone)]
pub struct PhotoSearchService<S> {
    source: Arc<S>,
}

impl<S> PhotoSearchService<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

fn map_source_error(context: String) -> impl FnOnce(PhotoSourceError) -> Error {
    move |cause| {
        match &cause {
            PhotoSourceError::NotFound { .. } | PhotoSourceError::InvalidRequest { .. } => {
                warn!(error = %cause, "{context}");
            }
            _ => error!(error = %cause, "{context}"),
        }
        match cause {
            PhotoSourceError::NotFound { .. } => Error::not_found(context),
            PhotoSourceError::InvalidRequest { message } => {
                Error::invalid_request(context).with_details(serde_json::json!({
                    "provider": message,
                }))
            }
            PhotoSourceError::Transport { .. }
            | PhotoSourceError::Timeout { .. }
            | PhotoSourceError::RateLimited { .. } => Error::service_unavailable(context),
            PhotoSourceError::Decode { .. } => Error::internal(context),
        }
    }
}

fn require_collection_id(id: &str) -> Result<&str, Error> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::invalid_request(COLLECTION_ID_REQUIRED));
    }
    Ok(id)
}

#[async_trait]
impl<S> PhotoSearchQuery for PhotoSearchService<S>
where
    S: PhotoSource,
{
    async fn search_photos(&self, query: &str, page: PhotoPage) -> Result<PhotoSearchPage, Error> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(PhotoSearchPage::default());
        }
        self.source
            .search_photos(query, page)
            .await
            .map_err(map_source_error("Failed to search photos.".to_owned()))
    }

    async fn photo_details(&self, id: &str) -> Result<Option<Value>, Error> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(None);
        }
        match self.source.photo(id).await {
            Ok(photo) => Ok(Some(photo)),
            Err(PhotoSourceError::NotFound { .. }) => Ok(None),
            Err(cause) => Err(map_source_error(format!("Failed to fetch photo {id}."))(cause)),
        }
    }

    async fn external_collection(&self, id: &str) -> Result<Value, Error> {
        let id = require_collection_id(id)?;
        self.source
            .collection(id)
            .await
            .map_err(map_source_error(format!(
                "Failed to fetch Unsplash collection {id}."
            )))
    }

    async fn external_collection_photos(
        &self,
        id: &str,
        page: PhotoPage,
        orientation: Option<Orientation>,
    ) -> Result<Value, Error> {
        let id = require_collection_id(id)?;
        self.source
            .collection_photos(id, page, orientation)
            .await
            .map_err(map_source_error(format!(
                "Failed to fetch photos for Unsplash collection {id}."
            )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockPhotoSource;
    use rstest::rstest;
    use serde_json::json;

    fn service(source: MockPhotoSource) -> PhotoSearchService<MockPhotoSource> {
        PhotoSearchService::new(Arc::new(source))
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_query_skips_provider(#[case] query: &str) {
        let mut source = MockPhotoSource::new();
        source.expect_search_photos().times(0);

        let page = service(source)
            .search_photos(query, PhotoPage::default())
            .await
            .expect("empty page");

        assert_eq!(page, PhotoSearchPage::default());
    }

    #[tokio::test]
    async fn search_passes_trimmed_query_and_page() {
        let mut source = MockPhotoSource::new();
        source
            .expect_search_photos()
            .withf(|query, page| query == "alps" && page.page() == 2 && page.per_page() == 10)
            .times(1)
            .return_once(|_, _| {
                Ok(PhotoSearchPage {
                    photos: vec![json!({ "id": "p1" })],
                    total_pages: 4,
                })
            });

        let page = service(source)
            .search_photos(" alps ", PhotoPage::new(Some(2), Some(10)).expect("page"))
            .await
            .expect("results");

        assert_eq!(page.total_pages, 4);
        assert_eq!(page.photos.len(), 1);
    }

    #[tokio::test]
    async fn missing_photo_is_none() {
        let mut source = MockPhotoSource::new();
        source
            .expect_photo()
            .times(1)
            .return_once(|_| Err(PhotoSourceError::not_found("status 404")));

        let photo = service(source).photo_details("gone").await.expect("lookup");

        assert_eq!(photo, None);
    }

    #[tokio::test]
    async fn blank_collection_id_is_invalid() {
        let err = service(MockPhotoSource::new())
            .external_collection(" ")
            .await
            .expect_err("blank id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), COLLECTION_ID_REQUIRED);
    }

    #[rstest]
    #[case(PhotoSourceError::timeout("slow"), ErrorCode::ServiceUnavailable)]
    #[case(PhotoSourceError::rate_limited("429"), ErrorCode::ServiceUnavailable)]
    #[case(PhotoSourceError::transport("reset"), ErrorCode::ServiceUnavailable)]
    #[case(PhotoSourceError::not_found("404"), ErrorCode::NotFound)]
    #[case(PhotoSourceError::invalid_request("400"), ErrorCode::InvalidRequest)]
    #[case(PhotoSourceError::decode("eof"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn provider_failures_map_to_domain_codes(
        #[case] failure: PhotoSourceError,
        #[case] expected: ErrorCode,
    ) {
        let mut source = MockPhotoSource::new();
        source
            .expect_collection_photos()
            .withf(|id, _, orientation| id == "abc" && *orientation == Some(Orientation::Portrait))
            .times(1)
            .return_once(move |_, _, _| Err(failure));

        let err = service(source)
            .external_collection_photos("abc", PhotoPage::default(), Some(Orientation::Portrait))
            .await
            .expect_err("provider failure");

        assert_eq!(err.code(), expected);
        assert_eq!(
            err.message(),
            "Failed to fetch photos for Unsplash collection abc."
        );
    }
}
