//! Lookup orchestrator for querying many boats on one date.
//!
//! This module provides the `LookupOrchestrator` which fans a date query out
//! over the selected boats with bounded concurrency and merges the entries,
//! open vessels first.

use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::filter::BoatFilter;
use crate::{date_error, lookup_with};
use charter_core::{Boat, BoatEntry, BoatQuery, QueryResult, ScanningConfig, ShipStatus};
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;

/// Default maximum number of lookups in flight.
pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 10;

/// Fans date queries out over registered boats.
#[derive(Debug, Clone)]
pub struct LookupOrchestrator {
    /// Shared HTTP client
    fetcher: Fetcher,
    /// Maximum concurrent lookups
    max_concurrent_lookups: usize,
    /// Emit per-entry extraction logs
    debug_enabled: bool,
}

impl LookupOrchestrator {
    /// Create an orchestrator around `fetcher`.
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            max_concurrent_lookups: DEFAULT_MAX_CONCURRENT_LOOKUPS,
            debug_enabled: false,
        }
    }

    /// Build from the `[scanning]` configuration section.
    pub fn from_config(config: &ScanningConfig) -> Result<Self> {
        let fetcher = Fetcher::with_timeout(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::new(fetcher)
            .with_max_concurrent_lookups(config.max_concurrent_lookups)
            .with_debug(config.debug_logging))
    }

    /// Set the maximum number of concurrent lookups.
    #[must_use]
    pub fn with_max_concurrent_lookups(mut self, max: usize) -> Self {
        self.max_concurrent_lookups = max;
        self
    }

    /// Enable or disable per-entry extraction logs.
    #[must_use]
    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    /// Number of lookups allowed in flight for `boat_count` boats.
    #[must_use]
    pub fn pool_width(&self, boat_count: usize) -> usize {
        self.max_concurrent_lookups.min(boat_count).max(1)
    }

    /// Query every boat selected by `filter` on the given date.
    ///
    /// A lookup that errors or panics contributes no entries and does not
    /// affect the others. Entries are merged in completion order, then
    /// stably reordered so open vessels come first.
    pub async fn query_all(
        &self,
        boats: &[Boat],
        filter: &BoatFilter,
        year: i32,
        month: u32,
        day: u32,
    ) -> Vec<BoatEntry> {
        let selected: Vec<&Boat> = boats.iter().filter(|boat| filter.matches(boat)).collect();
        if selected.is_empty() {
            return Vec::new();
        }

        let width = self.pool_width(selected.len());
        tracing::info!(boats = selected.len(), width, "starting lookups");

        let mut futures = FuturesUnordered::new();
        let mut rows = Vec::new();

        for boat in selected {
            let boat = boat.clone();
            let fetcher = self.fetcher.clone();
            let debug_enabled = self.debug_enabled;

            futures.push(async move {
                let task_boat = boat.clone();
                let handle = tokio::spawn(async move {
                    query_boat(&fetcher, &task_boat, year, month, day, debug_enabled).await
                });
                (boat, handle.await)
            });

            // Respect concurrency limit
            while futures.len() >= width {
                if let Some((boat, joined)) = futures.next().await {
                    collect(&boat, joined, &mut rows);
                }
            }
        }

        // Collect remaining results
        while let Some((boat, joined)) = futures.next().await {
            collect(&boat, joined, &mut rows);
        }

        sort_open_first(&mut rows);
        rows
    }
}

/// Stable reorder putting open entries ahead of everything else.
pub fn sort_open_first(rows: &mut [BoatEntry]) {
    rows.sort_by_key(|row| row.entry.status != ShipStatus::Open);
}

async fn query_boat(
    fetcher: &Fetcher,
    boat: &Boat,
    year: i32,
    month: u32,
    day: u32,
    debug_enabled: bool,
) -> QueryResult {
    match BoatQuery::new(boat.url.as_str(), year, month, day) {
        Ok(query) => lookup_with(fetcher, &query, debug_enabled).await,
        Err(e) => QueryResult::failed(boat.url.as_str(), "", date_error(e).to_string()),
    }
}

fn collect(
    boat: &Boat,
    joined: std::result::Result<QueryResult, tokio::task::JoinError>,
    rows: &mut Vec<BoatEntry>,
) {
    match joined {
        Ok(result) => {
            if let Some(error) = &result.error {
                tracing::warn!(boat = %boat.name, url = %result.source_url, %error, "lookup failed");
            }
            rows.extend(BoatEntry::from_result(boat, result));
        }
        Err(e) => {
            tracing::error!(boat = %boat.name, "lookup task failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charter_core::Entry;

    fn row(name: &str, status: ShipStatus) -> BoatEntry {
        BoatEntry {
            registered_name: "joker".to_string(),
            city: "보령".to_string(),
            port: "오천항".to_string(),
            url: "https://joker.example.com".to_string(),
            tide: None,
            entry: Entry::new(name, status, None, ""),
        }
    }

    #[test]
    fn test_sort_open_first_is_stable() {
        let mut rows = vec![
            row("a호", ShipStatus::Unknown),
            row("b호", ShipStatus::Open),
            row("c호", ShipStatus::Full),
            row("d호", ShipStatus::Open),
        ];
        sort_open_first(&mut rows);

        let names: Vec<_> = rows.iter().map(|r| r.entry.ship_name.as_str()).collect();
        assert_eq!(names, vec!["b호", "d호", "a호", "c호"]);
    }

    #[test]
    fn test_pool_width() {
        let orchestrator = LookupOrchestrator::new(Fetcher::new().expect("client"));
        assert_eq!(orchestrator.pool_width(3), 3);
        assert_eq!(orchestrator.pool_width(40), DEFAULT_MAX_CONCURRENT_LOOKUPS);
        assert_eq!(orchestrator.with_max_concurrent_lookups(0).pool_width(5), 1);
    }

    #[test]
    fn test_from_config() {
        let config = ScanningConfig {
            max_concurrent_lookups: 4,
            request_timeout_secs: 3,
            debug_logging: true,
        };
        let orchestrator = LookupOrchestrator::from_config(&config).expect("orchestrator");
        assert_eq!(orchestrator.pool_width(10), 4);
        assert!(orchestrator.debug_enabled);
    }

    #[tokio::test]
    async fn test_empty_selection_skips_network() {
        let orchestrator = LookupOrchestrator::new(Fetcher::new().expect("client"));
        let boats = vec![Boat {
            name: "joker".to_string(),
            url: "https://joker.example.com".to_string(),
            city: "보령".to_string(),
            port: String::new(),
            note: None,
        }];
        let filter = BoatFilter::Regions(vec!["군산".to_string()]);

        let rows = orchestrator.query_all(&boats, &filter, 2024, 5, 1).await;
        assert!(rows.is_empty());
    }
}
