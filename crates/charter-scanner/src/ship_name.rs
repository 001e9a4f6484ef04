//! Vessel-name filtering.
//!
//! Booking pages mix vessel rows with cabin rentals and notices. The "호"
//! suffix plus a short allow-list is the only signal markup gives us.

use charter_core::vocab::{BOOKING_BOILERPLATE, SHIP_SUFFIX, VALID_SHIP_NAMES};

/// True when `name` denotes a real vessel.
#[must_use]
pub fn is_valid_ship_name(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    name.contains(SHIP_SUFFIX) || VALID_SHIP_NAMES.contains(&name)
}

/// Strip booking boilerplate and surrounding whitespace.
#[must_use]
pub fn clean_ship_name(name: &str) -> String {
    name.replace(BOOKING_BOILERPLATE, "").trim().to_string()
}

/// Clean a scraped label and keep it only if it is a vessel name.
#[must_use]
pub fn accept_ship_name(raw: &str) -> Option<String> {
    let cleaned = clean_ship_name(raw);
    is_valid_ship_name(&cleaned).then_some(cleaned)
}
