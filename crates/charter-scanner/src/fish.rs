//! Species-tag matching.

use charter_core::vocab::FISH_KEYWORDS;
use once_cell::sync::Lazy;
use regex::Regex;

static FISH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(낚시\s*종류|어종)\s*[:：-]?\s*").expect("valid fish label regex"));

static TIDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*물").expect("valid tide regex"));

static NOTICE_LEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-zA-Z()\[\]#]").expect("valid notice regex"));

const SEPARATORS: &[char] = &['/', '&', '(', ')', ',', '·', '-'];

/// Longest notice text still taken verbatim as a tag.
pub const NOTICE_TAG_MAX_CHARS: usize = 20;

/// Drop whitespace (including NBSP) and separator punctuation.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !SEPARATORS.contains(c))
        .collect()
}

/// Vocabulary keywords found in any of `fragments`, in vocabulary order.
#[must_use]
pub fn match_species<'a, I>(fragments: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    let haystacks: Vec<String> = fragments.into_iter().map(normalize).collect();
    FISH_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| {
            let needle = normalize(keyword);
            haystacks.iter().any(|h| h.contains(&needle))
        })
        .collect()
}

/// Comma-joined species tag, or `None` when nothing matched.
#[must_use]
pub fn species_tag<'a, I>(fragments: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let found = match_species(fragments);
    (!found.is_empty()).then(|| found.join(", "))
}

/// Remove "낚시종류:" / "어종:" style label prefixes.
#[must_use]
pub fn strip_fish_label(text: &str) -> String {
    FISH_LABEL.replace_all(text, "").trim().to_string()
}

/// Take free-form notice text as a tag when it looks like one.
///
/// Short (at most 20 characters), not opening with a digit, Latin letter or
/// bracket, and fewer than two periods.
#[must_use]
pub fn notice_text_tag(text: &str) -> Option<String> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let short = text.chars().count() <= NOTICE_TAG_MAX_CHARS;
    let plain = !NOTICE_LEADING.is_match(&text);
    let prose = text.matches('.').count() >= 2;
    (!text.is_empty() && short && plain && !prose).then_some(text)
}

/// `"N물"` from the first "N 물" in `text`.
#[must_use]
pub fn parse_tide(text: &str) -> Option<String> {
    TIDE.captures(text).map(|caps| format!("{}물", &caps[1]))
}
