use crate::error::{Result, ScanError};
use url::Url;

/// Host fragment identifying fleet-schedule sites.
pub const FLEET_HOST_MARKER: &str = "sunsang24.com";

/// Path segment identifying fleet-schedule pages.
pub const FLEET_PATH_MARKER: &str = "schedule_fleet";

/// Parse a registered base URL, treating a scheme-less value as https.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    match Url::parse(trimmed) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{trimmed}"))
            .map_err(|e| ScanError::InvalidUrl(format!("{trimmed}: {e}"))),
        Err(e) => Err(ScanError::InvalidUrl(format!("{trimmed}: {e}"))),
    }
}

/// True when the URL points at a fleet-schedule site or page.
pub fn is_fleet_schedule(url: &Url) -> bool {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    host.contains(FLEET_HOST_MARKER) || url.path().contains(FLEET_PATH_MARKER)
}

/// Derive the date-scoped query URL for a boat's base URL.
///
/// Fleet-schedule sites get `/ship/schedule_fleet/{YYYY}{MM}` on the same
/// origin with query and fragment dropped. Every other site keeps its path and
/// query keys, with the board date keys upserted.
pub fn build_query_url(base_url: &str, year: i32, month: u32, day: u32) -> Result<String> {
    let mut url = parse_base_url(base_url)?;

    if is_fleet_schedule(&url) {
        url.set_path(&format!("/ship/{FLEET_PATH_MARKER}/{year:04}{month:02}"));
        url.set_query(None);
        url.set_fragment(None);
        return Ok(url.into());
    }

    let fixed = [
        ("year", format!("{year:04}")),
        ("month", format!("{month:02}")),
        ("day", format!("{day:02}")),
        ("mode", "list".to_string()),
        ("won", "1".to_string()),
        ("PA_N_UID", "0".to_string()),
        ("sel", "day".to_string()),
    ];

    // First occurrence of each key wins, fixed keys overwrite in place.
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        if pairs.iter().any(|(k, _)| *k == key) {
            continue;
        }
        let value = fixed
            .iter()
            .find(|(k, _)| *k == key)
            .map_or_else(|| value.into_owned(), |(_, v)| v.clone());
        pairs.push((key.into_owned(), value));
    }
    for (key, value) in &fixed {
        if !pairs.iter().any(|(k, _)| k.as_str() == *key) {
            pairs.push(((*key).to_string(), value.clone()));
        }
    }

    url.set_fragment(None);
    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url.into())
}
