//! Shared types used across the charter tracker.
//!
//! Every value here is request-scoped: a [`BoatQuery`] goes in, a
//! [`QueryResult`] comes out, and nothing outlives the lookup that built it.

use crate::error::CharterError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single date-scoped lookup against one boat's booking page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoatQuery {
    source_url: String,
    date: NaiveDate,
}

impl BoatQuery {
    /// Create a query for `source_url` on the given calendar date.
    ///
    /// # Errors
    /// Returns error if the year/month/day triple is not a real date.
    pub fn new(
        source_url: impl Into<String>,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Self, CharterError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CharterError::Validation(format!(
                "not a calendar date: {year:04}-{month:02}-{day:02}"
            ))
        })?;
        Ok(Self {
            source_url: source_url.into(),
            date,
        })
    }

    /// The boat's registered base URL.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The target date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `YYYY-MM-DD(요일)`, e.g. `2024-05-01(수)`.
    #[must_use]
    pub fn display_date(&self) -> String {
        format!(
            "{}({})",
            self.date.format("%Y-%m-%d"),
            korean_weekday(self.date.weekday())
        )
    }

    /// Fleet-schedule day-block id, `d{YYYY}-{MM}-{DD}`.
    #[must_use]
    pub fn day_block_id(&self) -> String {
        format!("d{}", self.date.format("%Y-%m-%d"))
    }

    /// Eight-digit `YYYYMMDD` used by board containers.
    #[must_use]
    pub fn date8(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

fn korean_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
        Weekday::Sun => "일",
    }
}

/// Normalized seat status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipStatus {
    /// Seats can still be booked
    Open,
    /// Sold out / booking closed
    Full,
    /// Booking completed
    Reserved,
    /// Vessel maintenance day
    Maintenance,
    /// Awaiting deposit
    Pending,
    /// Markup did not match any known status
    Unknown,
}

impl ShipStatus {
    /// Human-readable status text.
    ///
    /// Falls back to `raw` (or "알 수 없음") when the status itself carries no
    /// label, so the result is never blank.
    #[must_use]
    pub fn display(self, available: Option<u32>, raw: &str) -> String {
        match (self, available) {
            (Self::Open, Some(n)) => format!("남은자리 {n}명"),
            (Self::Full, _) => "예약마감".to_string(),
            (Self::Reserved, _) => "예약완료".to_string(),
            (Self::Maintenance, _) => "점검일".to_string(),
            (Self::Pending, _) => "입금대기".to_string(),
            _ => {
                let raw = raw.trim();
                if raw.is_empty() {
                    "알 수 없음".to_string()
                } else {
                    raw.to_string()
                }
            }
        }
    }
}

impl fmt::Display for ShipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Full => "full",
            Self::Reserved => "reserved",
            Self::Maintenance => "maintenance",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One vessel's normalized availability on the queried date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Cleaned vessel name
    pub ship_name: String,
    /// Normalized status
    pub status: ShipStatus,
    /// Confirmed seat count, 0 for full/reserved/maintenance
    pub available: Option<u32>,
    /// Status text as scraped
    pub raw_status_text: String,
    /// Human-readable derivation of `status`/`available`
    pub display_status: String,
    /// Species tag
    pub fish: Option<String>,
    /// Raw markup of the source row/table
    pub row_snapshot: String,
    /// `YYYY-MM-DD(요일)` of the query
    pub query_date: String,
}

impl Entry {
    /// Build an entry, deriving `display_status` from the status.
    #[must_use]
    pub fn new(
        ship_name: impl Into<String>,
        status: ShipStatus,
        available: Option<u32>,
        raw_status_text: impl Into<String>,
    ) -> Self {
        let raw_status_text = raw_status_text.into();
        Self {
            ship_name: ship_name.into(),
            display_status: status.display(available, &raw_status_text),
            status,
            available,
            raw_status_text,
            fish: None,
            row_snapshot: String::new(),
            query_date: String::new(),
        }
    }

    /// Attach a species tag.
    #[must_use]
    pub fn with_fish(mut self, fish: Option<String>) -> Self {
        self.fish = fish;
        self
    }

    /// Attach the raw markup the entry was read from.
    #[must_use]
    pub fn with_snapshot(mut self, row_snapshot: impl Into<String>) -> Self {
        self.row_snapshot = row_snapshot.into();
        self
    }

    /// Attach the display date of the query.
    #[must_use]
    pub fn with_query_date(mut self, query_date: impl Into<String>) -> Self {
        self.query_date = query_date.into();
        self
    }
}

/// Outcome of one [`BoatQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Entries in page order
    pub entries: Vec<Entry>,
    /// Tide text such as "7물"
    pub tide: Option<String>,
    /// URL actually fetched
    pub source_url: String,
    /// False only when a fleet-schedule page had no block for the date;
    /// failed lookups keep it true
    pub matched: bool,
    /// `http_error:…`, `http_status:…`, `invalid_date:…` or `invalid_url:…`
    pub error: Option<String>,
    /// `YYYY-MM-DD(요일)` of the query
    pub display_date: String,
    /// Fleet-schedule day-block id
    pub date_id: Option<String>,
    /// Leading slice of the fetched body, kept for diagnostics
    pub debug_excerpt: Option<String>,
}

impl QueryResult {
    /// A lookup that failed before any page could be parsed.
    ///
    /// `matched` stays true: only a fleet page that lacks the day block is
    /// reported as unmatched.
    #[must_use]
    pub fn failed(
        source_url: impl Into<String>,
        display_date: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            display_date: display_date.into(),
            matched: true,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// A fleet-schedule page with no block for the requested day.
    #[must_use]
    pub fn not_matched(
        source_url: impl Into<String>,
        display_date: impl Into<String>,
        date_id: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            display_date: display_date.into(),
            date_id: Some(date_id.into()),
            matched: false,
            ..Self::default()
        }
    }
}

/// A registered boat, as handed over by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boat {
    /// Registered display name
    pub name: String,
    /// Booking page base URL
    pub url: String,
    /// Region (city)
    #[serde(default)]
    pub city: String,
    /// Home port
    #[serde(default)]
    pub port: String,
    /// Free-form note
    #[serde(default)]
    pub note: Option<String>,
}

/// An [`Entry`] joined with the boat it was scraped for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatEntry {
    /// Registered name of the boat whose page produced the entry
    pub registered_name: String,
    /// Region (city)
    pub city: String,
    /// Home port
    pub port: String,
    /// URL actually fetched
    pub url: String,
    /// Page-level tide text
    pub tide: Option<String>,
    /// The normalized entry
    #[serde(flatten)]
    pub entry: Entry,
}

impl BoatEntry {
    /// Join every entry of `result` with `boat`.
    #[must_use]
    pub fn from_result(boat: &Boat, result: QueryResult) -> Vec<Self> {
        let url = if result.source_url.is_empty() {
            boat.url.clone()
        } else {
            result.source_url
        };
        result
            .entries
            .into_iter()
            .map(|entry| Self {
                registered_name: boat.name.clone(),
                city: boat.city.clone(),
                port: boat.port.clone(),
                url: url.clone(),
                tide: result.tide.clone(),
                entry,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_date_formats() {
        let query = BoatQuery::new("https://example.com", 2024, 5, 1).expect("valid date");
        assert_eq!(query.display_date(), "2024-05-01(수)");
        assert_eq!(query.day_block_id(), "d2024-05-01");
        assert_eq!(query.date8(), "20240501");
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = BoatQuery::new("https://example.com", 2024, 2, 30).unwrap_err();
        assert!(matches!(err, CharterError::Validation(_)));
        assert!(BoatQuery::new("https://example.com", 2024, 13, 1).is_err());
    }

    #[test]
    fn test_status_display_never_blank() {
        assert_eq!(ShipStatus::Open.display(Some(3), ""), "남은자리 3명");
        assert_eq!(ShipStatus::Full.display(Some(0), "매진"), "예약마감");
        assert_eq!(ShipStatus::Maintenance.display(Some(0), ""), "점검일");
        assert_eq!(ShipStatus::Pending.display(None, "입금대기중"), "입금대기");
        assert_eq!(ShipStatus::Unknown.display(None, "  "), "알 수 없음");
        assert_eq!(ShipStatus::Unknown.display(None, "문의"), "문의");
        assert_eq!(ShipStatus::Open.display(None, ""), "알 수 없음");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&ShipStatus::Maintenance).expect("serialize");
        assert_eq!(json, "\"maintenance\"");
        assert_eq!(ShipStatus::Open.to_string(), "open");
    }

    #[test]
    fn test_failed_and_not_matched_results() {
        let failed =
            QueryResult::failed("https://example.com/bk", "2024-05-01(수)", "http_status:500");
        assert!(failed.matched);
        assert_eq!(failed.error.as_deref(), Some("http_status:500"));
        assert!(failed.entries.is_empty());

        let missing =
            QueryResult::not_matched("https://example.com", "2024-06-09(일)", "d2024-06-09");
        assert!(!missing.matched);
        assert!(missing.error.is_none());
        assert_eq!(missing.date_id.as_deref(), Some("d2024-06-09"));
    }

    #[test]
    fn test_boat_entry_join() {
        let boat = Boat {
            name: "금강".to_string(),
            url: "https://example.com/bk".to_string(),
            city: "인천".to_string(),
            port: "남항".to_string(),
            note: None,
        };
        let result = QueryResult {
            entries: vec![Entry::new("금강7호", ShipStatus::Open, Some(4), "남은자리 4")],
            tide: Some("7물".to_string()),
            source_url: "http://example.com/bk?year=2024".to_string(),
            matched: true,
            ..QueryResult::default()
        };

        let rows = BoatEntry::from_result(&boat, result);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].registered_name, "금강");
        assert_eq!(rows[0].url, "http://example.com/bk?year=2024");
        assert_eq!(rows[0].tide.as_deref(), Some("7물"));
        assert_eq!(rows[0].entry.display_status, "남은자리 4명");
    }
}
