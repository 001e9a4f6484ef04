//! Fleet-schedule pages: one block per day, one sub-table per vessel.

use super::dom::{
    compact_text, dynamic_selector, find_text, first_in_chain, first_text_in_chain,
    next_sibling_named, selector, self_or_descendant, spaced_text,
};
use super::LayoutParser;
use crate::fish::strip_fish_label;
use crate::ship_name::accept_ship_name;
use crate::status::{classify_fleet, first_int};
use charter_core::{BoatQuery, Entry, QueryResult};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Comment that precedes the day-block list on some fleet pages.
const DAY_LIST_MARKER: &str = "날자별 선단 소속 선박 리스트";

/// Siblings inspected after the marker comment.
const MARKER_SIBLING_WALK: usize = 8;

const FISH_LABEL: &str = "낚시종류";

static TODAY_BLOCK: Lazy<Selector> = Lazy::new(|| selector(".shipsinfo_daywarp.weekday"));
static TIDE: Lazy<Selector> = Lazy::new(|| selector(".date_info2"));
static FISH_BY_ID: Lazy<Selector> = Lazy::new(|| selector("div#fish"));
static FISH_BY_CLASS: Lazy<Selector> = Lazy::new(|| selector(".fish"));
static SHIP_TABLES: Lazy<Selector> = Lazy::new(|| {
    selector(r#"table.ship_unit, table[class*="ship_unit_"], .ships_warp table"#)
});
static ANY_TABLE: Lazy<Selector> = Lazy::new(|| selector("table"));
static SHIP_MARKERS: Lazy<Selector> = Lazy::new(|| selector(".title, .ship_info"));

static TITLE_CHAIN: Lazy<Vec<Selector>> =
    Lazy::new(|| vec![selector(".ship_info .title"), selector(".title")]);

static STATUS_CHAIN: Lazy<Vec<Selector>> = Lazy::new(|| {
    vec![
        selector(".ship_info2 .shipping_status"),
        selector(".ship_info2"),
    ]
});

static SEATS_CHAIN: Lazy<Vec<Selector>> = Lazy::new(|| {
    vec![
        selector("span.number.blink_me.n_blue.f_20"),
        selector(".ship_info2 .number"),
        selector(".number"),
    ]
});

static SHIP_FISH_CHAIN: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        ".ship_info .fish",
        ".ship_info2 .fish",
        ".fish",
        "div.fish",
        "span.fish",
        ".ship_kinds",
        ".ship_kind",
        ".tags",
        ".tag_area",
    ]
    .into_iter()
    .map(selector)
    .collect()
});

static SHIP_FISH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(낚시\s*종류|어종)").expect("valid fish label regex"));

/// Parser for month-indexed fleet schedule pages.
pub struct FleetScheduleParser {
    date_id: String,
    display_date: String,
    debug_enabled: bool,
}

impl FleetScheduleParser {
    #[must_use]
    pub fn new(query: &BoatQuery, debug_enabled: bool) -> Self {
        Self {
            date_id: query.day_block_id(),
            display_date: query.display_date(),
            debug_enabled,
        }
    }

    /// Day block by id, then today's block, then via the list marker comment.
    fn locate_day_block<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let by_id = dynamic_selector(&format!(r#"[id="{}"]"#, self.date_id));
        if let Some(block) = by_id.as_ref().and_then(|sel| document.select(sel).next()) {
            return Some(block);
        }
        if let Some(block) = document.select(&TODAY_BLOCK).next() {
            return Some(block);
        }

        let family = dynamic_selector(&format!(
            r#".shipsinfo_daywarp[id="{}"], .shipsinfo_daywarp.weekday, .shipsinfo_daywarp"#,
            self.date_id
        ))?;
        document
            .tree
            .root()
            .descendants()
            .filter(|n| {
                n.value()
                    .as_comment()
                    .is_some_and(|c| c.contains(DAY_LIST_MARKER))
            })
            .find_map(|comment| {
                comment
                    .next_siblings()
                    .take(MARKER_SIBLING_WALK)
                    .filter_map(ElementRef::wrap)
                    .find_map(|el| self_or_descendant(el, &family))
            })
    }

    fn read_table(&self, table: ElementRef<'_>, page_fish: Option<&str>) -> Option<Entry> {
        let name = first_text_in_chain(table, &TITLE_CHAIN, compact_text);

        let status_el = first_in_chain(table, &STATUS_CHAIN);
        let status_text = status_el.map(spaced_text).unwrap_or_default();
        let status_code = status_el.and_then(|el| el.value().attr("data-status_code"));

        let available = first_in_chain(table, &SEATS_CHAIN)
            .and_then(|el| first_int(&el.text().collect::<String>()));

        let reading = classify_fleet(&status_text, status_code, available);
        let fish = ship_fish(table).or_else(|| page_fish.map(str::to_string));

        if self.debug_enabled {
            tracing::info!(
                target: "charter_scanner::extract",
                layout = "fleet_schedule",
                ship_name = ?name,
                status = %reading.status,
                available = ?reading.available,
                raw_status_text = %status_text,
                fish = ?fish,
                query_date = %self.display_date,
                "schedule entry"
            );
        }

        let ship_name = accept_ship_name(&name?)?;
        Some(
            reading
                .into_entry(ship_name, &status_text)
                .with_fish(fish)
                .with_snapshot(table.html())
                .with_query_date(&self.display_date),
        )
    }
}

impl LayoutParser for FleetScheduleParser {
    fn parse(&self, resolved_url: &str, body: &str) -> QueryResult {
        let document = Html::parse_document(body);

        let Some(block) = self.locate_day_block(&document) else {
            if self.debug_enabled {
                tracing::info!(
                    target: "charter_scanner::extract",
                    date_id = %self.date_id,
                    url = %resolved_url,
                    "no day block on schedule page"
                );
            }
            return QueryResult::not_matched(resolved_url, &self.display_date, &self.date_id);
        };

        let tide = block
            .select(&TIDE)
            .next()
            .map(spaced_text)
            .filter(|t| !t.is_empty());
        let page_fish = page_fish_tag(&document, block);

        if self.debug_enabled {
            tracing::info!(
                target: "charter_scanner::extract",
                fish = ?page_fish,
                date = %self.display_date,
                url = %resolved_url,
                "schedule page fish"
            );
        }

        let entries = ship_tables(block)
            .into_iter()
            .filter_map(|table| self.read_table(table, page_fish.as_deref()))
            .collect();

        QueryResult {
            entries,
            tide,
            source_url: resolved_url.to_string(),
            matched: true,
            error: None,
            display_date: self.display_date.clone(),
            date_id: Some(self.date_id.clone()),
            debug_excerpt: None,
        }
    }
}

/// Page-level species tag: a dedicated fish element, else the cell after a
/// "낚시종류" label.
fn page_fish_tag(document: &Html, block: ElementRef<'_>) -> Option<String> {
    let dedicated = block
        .select(&FISH_BY_ID)
        .next()
        .or_else(|| block.select(&FISH_BY_CLASS).next())
        .or_else(|| document.select(&FISH_BY_ID).next())
        .map(spaced_text)
        .filter(|t| !t.is_empty());
    if dedicated.is_some() {
        return dedicated;
    }

    let hit = find_text(block, |t| t.contains(FISH_LABEL))?;
    let after_cell = hit
        .parent
        .filter(|p| p.value().name() == "td")
        .and_then(|td| next_sibling_named(td, "td"));
    after_cell
        .or(hit.next)
        .map(spaced_text)
        .filter(|t| !t.is_empty())
}

fn ship_tables(block: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let tables: Vec<_> = block.select(&SHIP_TABLES).collect();
    if !tables.is_empty() {
        return tables;
    }
    block
        .select(&ANY_TABLE)
        .filter(|t| t.select(&SHIP_MARKERS).next().is_some())
        .collect()
}

/// Ship-scoped species tag: fish-ish elements first, then a labelled cell.
fn ship_fish(table: ElementRef<'_>) -> Option<String> {
    let read = |el: ElementRef<'_>| strip_fish_label(&spaced_text(el));

    if let Some(tag) = first_text_in_chain(table, &SHIP_FISH_CHAIN, read) {
        return Some(tag);
    }

    let hit = find_text(table, |t| SHIP_FISH_LABEL.is_match(t))?;
    hit.parent
        .filter(|p| p.value().name() == "td")
        .and_then(|td| next_sibling_named(td, "td"))
        .map(read)
        .filter(|t| !t.is_empty())
        .or_else(|| hit.next.map(read).filter(|t| !t.is_empty()))
}
