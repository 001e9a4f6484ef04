//! Charter Scanner - Seat-availability extraction for charter booking pages.
//!
//! This crate turns a boat's booking page plus a calendar date into a list of
//! normalized vessel entries. It builds the date-scoped URL, fetches it with a
//! header/scheme fallback ladder, picks the layout parser for the page family,
//! and fans out over many boats with bounded concurrency.
//!
//! # Features
//!
//! - Fleet-schedule and generic-board layouts
//! - 403 and transport-failure fallback (alternate headers, then plain http)
//! - Species tagging from a fixed vocabulary
//! - Concurrent multi-boat queries, open vessels first
//!
//! # Example
//!
//! ```rust,ignore
//! use charter_scanner::lookup;
//!
//! let result = lookup("https://jokerho.sunsang24.com", 2024, 5, 1, false).await;
//! for entry in &result.entries {
//!     println!("{} {}", entry.ship_name, entry.display_status);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod fetcher;
#[allow(missing_docs)]
pub mod filter;
pub mod fish;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod parser;
pub mod ship_name;
#[allow(missing_docs)]
pub mod status;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use fetcher::{FetchResult, Fetcher};
pub use filter::BoatFilter;
pub use orchestrator::{sort_open_first, LookupOrchestrator};
pub use parser::{LayoutParser, PageLayout};
pub use url_builder::build_query_url;

use charter_core::{BoatQuery, CharterError, QueryResult};
use chrono::Datelike;

/// Look up seat availability for one boat on one date.
///
/// Never fails: transport, status, URL and date problems are reported through
/// `QueryResult::error`.
pub async fn lookup(
    boat_url: &str,
    year: i32,
    month: u32,
    day: u32,
    debug_enabled: bool,
) -> QueryResult {
    let query = match BoatQuery::new(boat_url, year, month, day) {
        Ok(query) => query,
        Err(e) => return QueryResult::failed(boat_url, "", date_error(e).to_string()),
    };

    let fetcher = match Fetcher::new() {
        Ok(fetcher) => fetcher,
        Err(e) => return QueryResult::failed(boat_url, query.display_date(), e.to_string()),
    };

    lookup_with(&fetcher, &query, debug_enabled).await
}

/// Run `query` through an existing [`Fetcher`].
pub async fn lookup_with(fetcher: &Fetcher, query: &BoatQuery, debug_enabled: bool) -> QueryResult {
    let display_date = query.display_date();
    let date = query.date();

    let url = match build_query_url(query.source_url(), date.year(), date.month(), date.day()) {
        Ok(url) => url,
        Err(e) => return QueryResult::failed(query.source_url(), display_date, e.to_string()),
    };

    let fetched = fetcher.fetch(&url).await;
    let body = match (fetched.body, fetched.error) {
        (Some(body), None) => body,
        (_, error) => {
            let error = error
                .unwrap_or_else(|| ScanError::HttpStatus(fetched.status_code.unwrap_or_default()));
            tracing::warn!(url = %fetched.final_url, %error, "lookup failed");
            return QueryResult::failed(fetched.final_url, display_date, error.to_string());
        }
    };

    let layout = PageLayout::classify(&fetched.final_url);
    tracing::debug!(url = %fetched.final_url, ?layout, "parsing page");
    layout
        .parser(query, debug_enabled)
        .parse(&fetched.final_url, &body)
}

pub(crate) fn date_error(error: CharterError) -> ScanError {
    let CharterError::Validation(detail) = error;
    ScanError::InvalidDate(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_impossible_date_is_reported() {
        let result = lookup("https://example.com/board", 2024, 2, 30, false).await;

        assert!(result.entries.is_empty());
        assert_eq!(result.source_url, "https://example.com/board");
        let error = result.error.expect("error");
        assert!(error.starts_with("invalid_date:"), "{error}");
        assert!(error.contains("2024-02-30"), "{error}");
    }

    #[tokio::test]
    async fn test_unparseable_url_is_reported() {
        let fetcher = Fetcher::new().expect("client");
        let query = BoatQuery::new("http://[::1", 2024, 5, 1).expect("valid date");
        let result = lookup_with(&fetcher, &query, false).await;

        assert!(result.error.expect("error").starts_with("invalid_url:"));
        assert_eq!(result.display_date, "2024-05-01(수)");
    }
}
