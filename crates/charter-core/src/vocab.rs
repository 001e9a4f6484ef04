//! Compiled-in vocabularies.
//!
//! These lists are deployment-time constants. Nothing mutates them at runtime.

/// Species keywords recognized in fish tags, in priority order.
pub const FISH_KEYWORDS: &[&str] = &[
    "주꾸미",
    "쭈꾸미",
    "문어",
    "갑오징어",
    "우럭",
    "광어",
    "낙지",
    "백조기",
    "민어",
    "삼치",
    "쭈갑",
    "참돔",
    "갈치",
    "다운샷",
    "생미끼",
    "돌문어",
    "피문어",
    "외수질",
    "광어다운샷",
];

/// Vessel names accepted even without the "호" suffix.
pub const VALID_SHIP_NAMES: &[&str] = &[
    "팀만수",
    "힐링피싱",
    "라온피싱",
    "레드헌터",
    "레드히어로",
    "레드썬",
    "레드퀸",
    "골드피싱",
];

/// First-cell markers of board rows that are never vessels.
pub const EXCLUDE_KEYWORDS: &[&str] = &["공지사항", "입금대기", "선박명", "공지", "오늘:"];

/// Suffix that marks a vessel name.
pub const SHIP_SUFFIX: char = '호';

/// Boilerplate stripped from scraped vessel names.
pub const BOOKING_BOILERPLATE: &str = "예약하기";
