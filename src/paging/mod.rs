//! Paginated retrieval from rate-limited remote APIs.
//!
//! The helper in this module is transport-agnostic: callers supply a
//! [`PageFetcher`] that performs one `(offset, limit)` request, and
//! [`fetch_all_pages`] drives it until every item is collected, sleeping
//! through HTTP 429 responses with bounded backoff.
//!
//! # Example
//!
//! ```no_run
//! use festival_sync_core::paging::{DEFAULT_MAX_RETRIES, fetch_all_pages};
//! use festival_sync_core::spotify::{PlaylistTracksPager, SpotifyClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotifyClient::new("access-token")?;
//! let pager = PlaylistTracksPager::new(&client, "37i9dQZF1DXcBWIGoYBM5M");
//! let tracks = fetch_all_pages(&pager, DEFAULT_MAX_RETRIES).await?;
//! println!("{} tracks", tracks.len());
//! # Ok(())
//! # }
//! ```

mod backoff;
mod fetch;

pub use backoff::{
    BackoffPolicy, DEFAULT_MAX_RETRIES, FailureType, RetryDecision, WaitSource, classify_status,
    parse_retry_after,
};
pub use fetch::{fetch_all_pages, fetch_all_pages_with_policy};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Items requested per page.
pub const PAGE_LIMIT: u32 = 50;

/// One page as returned by a paged endpoint.
///
/// Both fields are optional on the wire: a page without `items` is treated as
/// malformed and ends pagination, a page without `total` is the last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Option<Vec<T>>,
    /// Total number of items across all pages, as reported by the server.
    pub total: Option<u32>,
}

impl<T> Page<T> {
    /// Creates a well-formed page.
    #[must_use]
    pub fn new(items: Vec<T>, total: u32) -> Self {
        Self {
            items: Some(items),
            total: Some(total),
        }
    }

    /// Creates a page without items (malformed response).
    #[must_use]
    pub fn malformed() -> Self {
        Self {
            items: None,
            total: None,
        }
    }
}

/// Error contract the pagination helper needs from a fetcher.
///
/// Only the HTTP status and the raw `Retry-After` header drive retry
/// decisions; the error itself is handed back to the caller untouched.
pub trait PageError: std::error::Error + Send + Sync + 'static {
    /// HTTP status of the failed request, if a response was received.
    fn status(&self) -> Option<u16>;

    /// Raw `Retry-After` header value, if present.
    fn retry_after(&self) -> Option<&str>;
}

/// Performs one page request against a paged endpoint.
#[async_trait]
pub trait PageFetcher<T: Send>: Send + Sync {
    /// Error returned by a failed request.
    type Error: PageError;

    /// Fetches up to `limit` items starting at `offset`.
    async fn fetch_page(&self, offset: u32, limit: u32) -> Result<Page<T>, Self::Error>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_paging_object() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"items":[1,2,3],"total":10,"limit":50,"offset":0}"#)
                .unwrap();
        assert_eq!(page, Page::new(vec![1, 2, 3], 10));
    }

    #[test]
    fn test_page_missing_items_deserializes_as_malformed() {
        let page: Page<u32> = serde_json::from_str(r#"{"total":10}"#).unwrap();
        assert!(page.items.is_none());
        assert_eq!(page.total, Some(10));
    }

    #[test]
    fn test_page_null_items_deserializes_as_malformed() {
        let page: Page<u32> = serde_json::from_str(r#"{"items":null}"#).unwrap();
        assert_eq!(page, Page::malformed());
    }
}
