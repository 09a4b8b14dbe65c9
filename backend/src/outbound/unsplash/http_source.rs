//! Reqwest-backed Unsplash photo source.
//!
//! This adapter owns transport details only: URL building, authentication
//! headers, timeout and HTTP error mapping, and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::dto::SearchResponseDto;
use crate::domain::ports::{PhotoSource, PhotoSourceError};
use crate::domain::{Orientation, PhotoPage, PhotoSearchPage};

/// Public API root used when no override is configured.
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com/";

const ACCEPT_VERSION: &str = "v1";

/// Photo source that performs authenticated GET requests against Unsplash.
pub struct UnsplashHttpSource {
    client: Client,
    base_url: Url,
    authorization: String,
}

impl UnsplashHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        access_key: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            authorization: format!("Client-ID {access_key}"),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, PhotoSourceError> {
        build_endpoint(&self.base_url, segments)
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, PhotoSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.authorization.as_str())
            .header("Accept-Version", ACCEPT_VERSION)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl PhotoSource for UnsplashHttpSource {
    async fn search_photos(
        &self,
        query: &str,
        page: PhotoPage,
    ) -> Result<PhotoSearchPage, PhotoSourceError> {
        let mut url = self.endpoint(&["search", "photos"])?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("page", &page.page().to_string())
            .append_pair("per_page", &page.per_page().to_string());

        let body = self.get(url).await?;
        parse_search_page(&body)
    }

    async fn photo(&self, id: &str) -> Result<Value, PhotoSourceError> {
        let url = self.endpoint(&["photos", id])?;
        let body = self.get(url).await?;
        parse_json(&body)
    }

    async fn collection(&self, id: &str) -> Result<Value, PhotoSourceError> {
        let url = self.endpoint(&["collections", id])?;
        let body = self.get(url).await?;
        parse_json(&body)
    }

    async fn collection_photos(
        &self,
        id: &str,
        page: PhotoPage,
        orientation: Option<Orientation>,
    ) -> Result<Value, PhotoSourceError> {
        let mut url = self.endpoint(&["collections", id, "photos"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("page", &page.page().to_string())
                .append_pair("per_page", &page.per_page().to_string());
            if let Some(orientation) = orientation {
                pairs.append_pair("orientation", orientation.as_str());
            }
        }

        let body = self.get(url).await?;
        parse_json(&body)
    }
}

/// Append percent-encoded path segments to the API root.
fn build_endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, PhotoSourceError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| PhotoSourceError::invalid_request("Unsplash base URL cannot be a base"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_json(body: &[u8]) -> Result<Value, PhotoSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        PhotoSourceError::decode(format!("invalid Unsplash JSON payload: {error}"))
    })
}

fn parse_search_page(body: &[u8]) -> Result<PhotoSearchPage, PhotoSourceError> {
    let decoded: SearchResponseDto = serde_json::from_slice(body).map_err(|error| {
        PhotoSourceError::decode(format!("invalid Unsplash search payload: {error}"))
    })?;
    Ok(decoded.into())
}

fn map_transport_error(error: reqwest::Error) -> PhotoSourceError {
    if error.is_timeout() {
        PhotoSourceError::timeout(error.to_string())
    } else {
        PhotoSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PhotoSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => PhotoSourceError::not_found(message),
        StatusCode::TOO_MANY_REQUESTS => PhotoSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PhotoSourceError::timeout(message)
        }
        _ if status.is_client_error() => PhotoSourceError::invalid_request(message),
        _ => PhotoSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network Unsplash helpers.

    use super::*;
    use rstest::rstest;

    fn base() -> Url {
        Url::parse(DEFAULT_UNSPLASH_BASE_URL).expect("default base URL parses")
    }

    #[rstest]
    #[case::search(&["search", "photos"], "https://api.unsplash.com/search/photos")]
    #[case::photo(&["photos", "Dwu85P9SOIk"], "https://api.unsplash.com/photos/Dwu85P9SOIk")]
    #[case::encoded(&["collections", "a/b c"], "https://api.unsplash.com/collections/a%2Fb%20c")]
    fn builds_endpoints_under_the_base_url(#[case] segments: &[&str], #[case] expected: &str) {
        let url = build_endpoint(&base(), segments).expect("endpoint builds");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn keeps_a_base_path_prefix() {
        let base = Url::parse("http://localhost:8080/unsplash").expect("url");
        let url = build_endpoint(&base, &["photos", "x"]).expect("endpoint builds");
        assert_eq!(url.as_str(), "http://localhost:8080/unsplash/photos/x");
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, "NotFound")]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, "RateLimited")]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, "Timeout")]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, "Timeout")]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, "InvalidRequest")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Transport")]
    fn maps_http_statuses_to_port_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"{\"errors\":[\"nope\"]}");
        let matched = match expected {
            "NotFound" => matches!(error, PhotoSourceError::NotFound { .. }),
            "RateLimited" => matches!(error, PhotoSourceError::RateLimited { .. }),
            "Timeout" => matches!(error, PhotoSourceError::Timeout { .. }),
            "InvalidRequest" => matches!(error, PhotoSourceError::InvalidRequest { .. }),
            "Transport" => matches!(error, PhotoSourceError::Transport { .. }),
            _ => panic!("unsupported test expectation: {expected}"),
        };
        assert!(matched, "{status} should map to {expected}, got {error:?}");
    }

    #[test]
    fn status_messages_carry_a_compact_body_preview() {
        let body = format!("{{\"errors\": [\"{}\"]}}", "x".repeat(400));
        let error = map_status_error(StatusCode::BAD_REQUEST, body.as_bytes());
        let message = error.to_string();
        assert!(message.contains("status 400"));
        assert!(message.ends_with("..."));
    }

    #[test]
    fn parses_search_results_into_a_page() {
        let body = br#"{"total": 2, "total_pages": 1, "results": [{"id": "a"}, {"id": "b"}]}"#;
        let page = parse_search_page(body).expect("search payload decodes");
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.photos.len(), 2);
        assert_eq!(page.photos[0]["id"], "a");
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let error = parse_json(b"<html>").expect_err("html is not json");
        assert!(matches!(error, PhotoSourceError::Decode { .. }));
    }
}
