//! Status classification.
//!
//! Raw status text (and, on fleet pages, a status code attribute) is mapped
//! onto [`ShipStatus`] by first-matching rule. Rules differ slightly between
//! the two page families.

use charter_core::{Entry, ShipStatus};
use once_cell::sync::Lazy;
use regex::Regex;

static FULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"예약마감|매진|마감").expect("valid full regex"));

static RESERVED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"예약\s*완료").expect("valid reserved regex"));

static SEAT_COUNT: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"남은\s*자리\s*[:：]?\s*(\d+)").expect("valid seat regex"),
        Regex::new(r"남은자리\s*(\d+)").expect("valid seat regex"),
        Regex::new(r"(\d+)\s*명").expect("valid seat regex"),
    ]
});

static FIRST_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid int regex"));

const MAINTENANCE_MARKER: &str = "점검일";
const PENDING_MARKER: &str = "입금대기";
const END_CODE: &str = "END";

/// Status plus the seat count that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReading {
    pub status: ShipStatus,
    pub available: Option<u32>,
}

impl StatusReading {
    fn new(status: ShipStatus, available: Option<u32>) -> Self {
        Self { status, available }
    }

    /// Build the entry for `ship_name`, deriving the display text.
    #[must_use]
    pub fn into_entry(self, ship_name: impl Into<String>, raw_status_text: &str) -> Entry {
        Entry::new(ship_name, self.status, self.available, raw_status_text)
    }
}

/// First integer in `text`.
#[must_use]
pub fn first_int(text: &str) -> Option<u32> {
    FIRST_INT.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Seat count from text such as "남은 자리: 3", "남은자리3" or "3명".
#[must_use]
pub fn seat_count(text: &str) -> Option<u32> {
    SEAT_COUNT
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}

/// Fleet-schedule rule set.
///
/// `available` is the count read from the table's number element, if any.
#[must_use]
pub fn classify_fleet(text: &str, status_code: Option<&str>, available: Option<u32>) -> StatusReading {
    if text.contains(MAINTENANCE_MARKER) {
        StatusReading::new(ShipStatus::Maintenance, Some(0))
    } else if status_code == Some(END_CODE) || FULL.is_match(text) {
        StatusReading::new(ShipStatus::Full, available.or(Some(0)))
    } else if RESERVED.is_match(text) {
        StatusReading::new(ShipStatus::Reserved, Some(0))
    } else if available.is_some_and(|n| n > 0) {
        StatusReading::new(ShipStatus::Open, available)
    } else {
        StatusReading::new(ShipStatus::Unknown, available)
    }
}

/// Board rule set for text read from an `admin-right-*` status marker.
#[must_use]
pub fn classify_board_marker(raw: &str) -> StatusReading {
    if raw.contains(MAINTENANCE_MARKER) {
        return StatusReading::new(ShipStatus::Maintenance, Some(0));
    }
    if let Some(n) = seat_count(raw) {
        return StatusReading::new(ShipStatus::Open, Some(n));
    }
    if RESERVED.is_match(raw) {
        StatusReading::new(ShipStatus::Reserved, Some(0))
    } else if FULL.is_match(raw) {
        StatusReading::new(ShipStatus::Full, Some(0))
    } else {
        StatusReading::new(ShipStatus::Unknown, None)
    }
}

/// Board rule set for rows without a status marker (second-cell text).
#[must_use]
pub fn classify_board_text(raw: &str) -> StatusReading {
    if raw.contains(PENDING_MARKER) {
        StatusReading::new(ShipStatus::Pending, None)
    } else if RESERVED.is_match(raw) {
        StatusReading::new(ShipStatus::Reserved, Some(0))
    } else {
        StatusReading::new(ShipStatus::Unknown, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_marker_open_seat_count() {
        let reading = classify_board_marker("남은자리 3명");
        assert_eq!(reading.status, ShipStatus::Open);
        assert_eq!(reading.available, Some(3));
        let entry = reading.into_entry("금강7호", "남은자리 3명");
        assert_eq!(entry.display_status, "남은자리 3명");
    }

    #[test]
    fn test_board_marker_seat_variants() {
        assert_eq!(classify_board_marker("남은 자리: 12").available, Some(12));
        assert_eq!(classify_board_marker("남은자리5").available, Some(5));
        assert_eq!(classify_board_marker("7 명").available, Some(7));
    }

    #[test]
    fn test_maintenance_wins() {
        let reading = classify_board_marker("점검일 (남은자리 3명)");
        assert_eq!(reading, StatusReading::new(ShipStatus::Maintenance, Some(0)));

        let reading = classify_fleet("선박 점검일", None, Some(9));
        assert_eq!(reading, StatusReading::new(ShipStatus::Maintenance, Some(0)));
    }

    #[test]
    fn test_sold_out_is_full() {
        assert_eq!(
            classify_board_marker("매진"),
            StatusReading::new(ShipStatus::Full, Some(0))
        );
        assert_eq!(
            classify_fleet("매진", None, None),
            StatusReading::new(ShipStatus::Full, Some(0))
        );
    }

    #[test]
    fn test_fleet_end_code_is_full() {
        let reading = classify_fleet("", Some("END"), Some(2));
        assert_eq!(reading, StatusReading::new(ShipStatus::Full, Some(2)));
    }

    #[test]
    fn test_reserved_variants() {
        assert_eq!(classify_board_marker("예약 완료").status, ShipStatus::Reserved);
        assert_eq!(classify_board_text("예약완료").status, ShipStatus::Reserved);
        assert_eq!(classify_fleet("예약  완료", None, None).available, Some(0));
    }

    #[test]
    fn test_fleet_open_needs_positive_count() {
        assert_eq!(classify_fleet("예약가능", None, Some(4)).status, ShipStatus::Open);
        let reading = classify_fleet("예약가능", None, Some(0));
        assert_eq!(reading.status, ShipStatus::Unknown);
        let entry = classify_fleet("", None, None).into_entry("조커호", "");
        assert_eq!(entry.display_status, "알 수 없음");
    }

    #[test]
    fn test_board_text_pending() {
        let reading = classify_board_text("입금대기");
        assert_eq!(reading, StatusReading::new(ShipStatus::Pending, None));
        assert_eq!(reading.into_entry("조커호", "입금대기").display_status, "입금대기");
        assert_eq!(classify_board_text("문의").status, ShipStatus::Unknown);
    }

    #[test]
    fn test_first_int() {
        assert_eq!(first_int("잔여 14석"), Some(14));
        assert_eq!(first_int("없음"), None);
    }
}
