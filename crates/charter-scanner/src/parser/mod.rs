//! Page classification and layout-specific extraction.
//!
//! A fetched page is handed to exactly one [`LayoutParser`], chosen from the
//! shape of the resolved URL by [`PageLayout::classify`].

mod board;
mod dom;
mod fleet;

pub use board::{forward_fish_tags, BoardParser};
pub use fleet::FleetScheduleParser;

use crate::url_builder::{is_fleet_schedule, parse_base_url};
use charter_core::{BoatQuery, QueryResult};

/// Common contract of both layout strategies.
pub trait LayoutParser {
    /// Extract entries from `body`, fetched from `resolved_url`.
    ///
    /// Never fails: markup that doesn't match yields empty entries.
    fn parse(&self, resolved_url: &str, body: &str) -> QueryResult;
}

/// The two known booking-page families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    /// Month-indexed schedule with one block per day
    FleetSchedule,
    /// Bulletin-board listing filtered by date
    GenericBoard,
}

impl PageLayout {
    /// Pick the layout from the resolved URL alone.
    #[must_use]
    pub fn classify(resolved_url: &str) -> Self {
        match parse_base_url(resolved_url) {
            Ok(url) if is_fleet_schedule(&url) => Self::FleetSchedule,
            _ => Self::GenericBoard,
        }
    }

    /// Build the parser for this layout.
    #[must_use]
    pub fn parser(self, query: &BoatQuery, debug_enabled: bool) -> Box<dyn LayoutParser> {
        match self {
            Self::FleetSchedule => Box::new(FleetScheduleParser::new(query, debug_enabled)),
            Self::GenericBoard => Box::new(BoardParser::new(query, debug_enabled)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_host_or_path() {
        assert_eq!(
            PageLayout::classify("https://jokerho.sunsang24.com/ship/schedule_fleet/202405"),
            PageLayout::FleetSchedule
        );
        assert_eq!(
            PageLayout::classify("http://fleet.example.com/ship/schedule_fleet/202405"),
            PageLayout::FleetSchedule
        );
        assert_eq!(
            PageLayout::classify("https://www.example.co.kr/index.php?mid=bk&year=2024"),
            PageLayout::GenericBoard
        );
    }

    #[test]
    fn test_classify_ignores_query_mentions() {
        assert_eq!(
            PageLayout::classify("https://www.example.co.kr/index.php?ref=schedule_fleet"),
            PageLayout::GenericBoard
        );
    }
}
