//! DTOs for decoding Unsplash search responses.
//!
//! Photo and collection bodies are passed through untouched; only the search
//! envelope is reshaped.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::PhotoSearchPage;

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    pub(super) results: Vec<Value>,
    #[serde(default)]
    pub(super) total_pages: u32,
}

impl From<SearchResponseDto> for PhotoSearchPage {
    fn from(dto: SearchResponseDto) -> Self {
        Self {
            photos: dto.results,
            total_pages: dto.total_pages,
        }
    }
}
