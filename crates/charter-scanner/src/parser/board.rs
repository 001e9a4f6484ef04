//! Generic bulletin-board listings filtered by date.
//!
//! Rows are read top to bottom. Notice rows carry the species tag for the
//! vessel rows that follow them, so the scan keeps a running tag.

use super::dom::{
    ancestor_named, cells, excerpt, next_sibling_named, selector, spaced_text, text_fragments,
};
use super::LayoutParser;
use crate::fish::{notice_text_tag, parse_tide, species_tag};
use crate::ship_name::accept_ship_name;
use crate::status::{classify_board_marker, classify_board_text, StatusReading};
use charter_core::vocab::EXCLUDE_KEYWORDS;
use charter_core::{BoatQuery, Entry, QueryResult};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Length of the body excerpt attached to every board result.
pub const DEBUG_EXCERPT_CHARS: usize = 1000;

const NOTICE_MARKER: &str = "공지";
const FISH_LABEL: &str = "낚시종류";

static NEW_LISTINGS: Lazy<Selector> = Lazy::new(|| selector(".new-divs"));
static TIDE_ROW: Lazy<Selector> = Lazy::new(|| selector("tr.jeil-panel"));
static FISH_BY_ID: Lazy<Selector> = Lazy::new(|| selector("div#fish"));
static FISH_BY_CLASS: Lazy<Selector> = Lazy::new(|| selector(".fish"));
static FISH_LABEL_IMG: Lazy<Selector> = Lazy::new(|| selector(r#"img[alt="낚시종류"]"#));
static NOTICE_IMG: Lazy<Selector> = Lazy::new(|| selector(r#"img[alt*="공지"]"#));
static STATUS_MARKER: Lazy<Selector> = Lazy::new(|| selector(r#"div[id^="admin-right-"]"#));
static DIV: Lazy<Selector> = Lazy::new(|| selector("div"));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("td"));

/// Parser for date-filtered board listings.
pub struct BoardParser {
    date8: String,
    display_date: String,
    debug_enabled: bool,
}

impl BoardParser {
    #[must_use]
    pub fn new(query: &BoatQuery, debug_enabled: bool) -> Self {
        Self {
            date8: query.date8(),
            display_date: query.display_date(),
            debug_enabled,
        }
    }

    fn locate_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let by_id = selector(&format!(r#"div[id="new-div-{}"]"#, self.date8));
        document
            .select(&by_id)
            .next()
            .or_else(|| document.select(&NEW_LISTINGS).next())
    }

    fn scan_rows(&self, rows: &[ElementRef<'_>], page_fish: Option<String>) -> Vec<Entry> {
        let mut current_fish = page_fish;
        let mut entries = Vec::new();

        for &row in rows {
            let cols = cells(row, &CELL);
            let Some(&first) = cols.first() else {
                continue;
            };

            if is_notice(first) {
                if let Some(tag) = cols.get(1).and_then(|&c| notice_tag(c)) {
                    current_fish = Some(tag);
                }
                continue;
            }

            let name = spaced_text(first);
            if cols.len() >= 2 && name.contains(FISH_LABEL) {
                let tag = spaced_text(cols[1]);
                // A blank label cell keeps the running tag.
                if !tag.is_empty() {
                    current_fish = Some(tag);
                }
                continue;
            }

            if cols.len() < 3 || is_excluded(&name) {
                continue;
            }

            let (reading, raw) = read_row_status(row, cols[1], cols[2]);
            self.log_entry(&name, &reading, &raw, current_fish.as_deref());

            let Some(ship_name) = accept_ship_name(&name) else {
                continue;
            };
            entries.push(
                reading
                    .into_entry(ship_name, &raw)
                    .with_fish(current_fish.clone())
                    .with_snapshot(row.html())
                    .with_query_date(&self.display_date),
            );
        }
        entries
    }

    /// Degraded pass keyed on status markers rather than row shape.
    fn scan_markers(&self, document: &Html, page_fish: Option<&str>) -> Vec<Entry> {
        let rows: Vec<ElementRef<'_>> = document.select(&ROW).collect();
        let forward = forward_fish_tags(&rows);

        document
            .select(&STATUS_MARKER)
            .filter_map(|marker| {
                let row = ancestor_named(marker, "tr")?;
                let idx = rows.iter().position(|r| r.id() == row.id())?;
                let name = row_name(&rows, idx)?;

                let raw = marker_text(marker);
                let reading = classify_board_marker(&raw);
                let fish = forward[idx]
                    .clone()
                    .or_else(|| page_fish.map(str::to_string));
                self.log_entry(&name, &reading, &raw, fish.as_deref());

                let ship_name = accept_ship_name(&name)?;
                Some(
                    reading
                        .into_entry(ship_name, &raw)
                        .with_fish(fish)
                        .with_snapshot(row.html())
                        .with_query_date(&self.display_date),
                )
            })
            .collect()
    }

    fn log_entry(&self, name: &str, reading: &StatusReading, raw: &str, fish: Option<&str>) {
        if self.debug_enabled {
            tracing::info!(
                target: "charter_scanner::extract",
                layout = "generic_board",
                ship_name = %name,
                status = %reading.status,
                available = ?reading.available,
                raw_status_text = %raw,
                fish = ?fish,
                query_date = %self.display_date,
                "board entry"
            );
        }
    }
}

impl LayoutParser for BoardParser {
    fn parse(&self, resolved_url: &str, body: &str) -> QueryResult {
        let document = Html::parse_document(body);
        let container = self.locate_container(&document);

        let tide = container
            .and_then(|c| c.select(&TIDE_ROW).next())
            .and_then(|tr| tr.value().attr("data-str"))
            .and_then(parse_tide);
        let page_fish = page_fish_tag(&document, container);

        let rows = container
            .map(|c| c.select(&ROW).collect::<Vec<_>>())
            .filter(|rows| !rows.is_empty())
            .unwrap_or_else(|| document.select(&ROW).collect());

        if self.debug_enabled {
            tracing::info!(
                target: "charter_scanner::extract",
                container = container.is_some(),
                rows = rows.len(),
                fish = ?page_fish,
                url = %resolved_url,
                "board page"
            );
        }

        let mut entries = self.scan_rows(&rows, page_fish.clone());
        if entries.is_empty() {
            entries = self.scan_markers(&document, page_fish.as_deref());
        }

        QueryResult {
            entries,
            tide,
            source_url: resolved_url.to_string(),
            matched: true,
            error: None,
            display_date: self.display_date.clone(),
            date_id: None,
            debug_excerpt: Some(excerpt(body, DEBUG_EXCERPT_CHARS)),
        }
    }
}

/// Species tag in effect at each row: the tag of the last vocabulary-matching
/// notice strictly above it.
#[must_use]
pub fn forward_fish_tags(rows: &[ElementRef<'_>]) -> Vec<Option<String>> {
    let mut current: Option<String> = None;
    rows.iter()
        .map(|&row| {
            let in_effect = current.clone();
            let cols = cells(row, &CELL);
            if cols.first().is_some_and(|&c| is_notice(c)) {
                if let Some(tag) = cols.get(1).and_then(|&c| species_tag(text_fragments(c))) {
                    current = Some(tag);
                }
            }
            in_effect
        })
        .collect()
}

fn is_notice(first_cell: ElementRef<'_>) -> bool {
    first_cell.select(&NOTICE_IMG).next().is_some()
        || first_cell
            .select(&DIV)
            .next()
            .is_some_and(|div| spaced_text(div).contains(NOTICE_MARKER))
}

/// Tag from a notice's second cell: vocabulary matches, else short free text.
fn notice_tag(cell: ElementRef<'_>) -> Option<String> {
    species_tag(text_fragments(cell)).or_else(|| notice_text_tag(&spaced_text(cell)))
}

fn is_excluded(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    let squashed: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    EXCLUDE_KEYWORDS
        .iter()
        .any(|k| name.contains(k) || squashed.contains(k))
}

fn marker_text(marker: ElementRef<'_>) -> String {
    marker
        .select(&IMG)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map_or_else(|| spaced_text(marker), |alt| alt.trim().to_string())
}

fn read_row_status(
    row: ElementRef<'_>,
    second: ElementRef<'_>,
    third: ElementRef<'_>,
) -> (StatusReading, String) {
    let marker = third
        .select(&STATUS_MARKER)
        .next()
        .or_else(|| row.select(&STATUS_MARKER).next());
    match marker {
        Some(marker) => {
            let raw = marker_text(marker);
            (classify_board_marker(&raw), raw)
        }
        None => {
            let raw = spaced_text(second);
            (classify_board_text(&raw), raw)
        }
    }
}

/// First-cell text of `rows[idx]`, or of the next row that has one.
fn row_name(rows: &[ElementRef<'_>], idx: usize) -> Option<String> {
    let own = rows
        .get(idx)
        .and_then(|&row| cells(row, &CELL).first().map(|&c| spaced_text(c)))
        .filter(|name| !name.is_empty());
    own.or_else(|| {
        rows.iter().skip(idx + 1).find_map(|&row| {
            let cols = cells(row, &CELL);
            if cols.len() < 2 {
                return None;
            }
            let name = spaced_text(cols[0]);
            (!name.is_empty()).then_some(name)
        })
    })
}

/// Page-level species tag: a dedicated fish element, else the cell next to a
/// "낚시종류" label inside the date container.
fn page_fish_tag(document: &Html, container: Option<ElementRef<'_>>) -> Option<String> {
    let dedicated = container
        .and_then(|c| {
            c.select(&FISH_BY_ID)
                .next()
                .or_else(|| c.select(&FISH_BY_CLASS).next())
        })
        .or_else(|| document.select(&FISH_BY_ID).next())
        .map(spaced_text)
        .filter(|t| !t.is_empty());
    if dedicated.is_some() {
        return dedicated;
    }

    let scope = container?;
    let label = scope
        .select(&DIV)
        .find(|div| spaced_text(*div) == FISH_LABEL)
        .or_else(|| scope.select(&FISH_LABEL_IMG).next())?;
    let cell = ancestor_named(label, "td")?;
    next_sibling_named(cell, "td")
        .map(spaced_text)
        .filter(|t| !t.is_empty())
}
