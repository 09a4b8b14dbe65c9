//! Photo search request and response shapes.
//!
//! Photos and external collections are provider-owned JSON; the gateway
//! passes them through untouched and only validates what it sends upstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::Error;

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not supply one.
pub const DEFAULT_PER_PAGE: u32 = 20;
/// Largest page size the provider serves.
pub const MAX_PER_PAGE: u32 = 30;

/// Validated pagination window.
///
/// # Examples
/// ```
/// use gallery::domain::PhotoPage;
///
/// let page = PhotoPage::new(None, None).expect("defaults");
/// assert_eq!((page.page(), page.per_page()), (1, 20));
/// assert!(PhotoPage::new(Some(0), None).is_err());
/// assert!(PhotoPage::new(None, Some(31)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoPage {
    page: u32,
    per_page: u32,
}

impl PhotoPage {
    pub fn new(page: Option<u32>, per_page: Option<u32>) -> Result<Self, Error> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
        if page == 0 {
            return Err(Error::invalid_request("page must be at least 1"));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(Error::invalid_request(format!(
                "perPage must be between 1 and {MAX_PER_PAGE}"
            )));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

impl Default for PhotoPage {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Orientation filter for collection photo listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Squarish,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "landscape",
            Self::Portrait => "portrait",
            Self::Squarish => "squarish",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            "squarish" => Ok(Self::Squarish),
            other => Err(Error::invalid_request(format!(
                "orientation must be landscape, portrait or squarish, got {other:?}"
            ))),
        }
    }
}

/// One page of photo search results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSearchPage {
    #[schema(value_type = Vec<Object>)]
    pub photos: Vec<Value>,
    pub total_pages: u32,
}
