//! Small DOM helpers over `scraper` shared by both layout parsers.

use scraper::{ElementRef, Selector};

/// Compile a selector known at build time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Compile a selector built from page data; `None` if it doesn't parse.
pub(crate) fn dynamic_selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Text fragments joined with single spaces, each trimmed.
pub(crate) fn spaced_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text fragments trimmed and concatenated.
pub(crate) fn compact_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Non-empty trimmed text fragments under `el`, in document order.
pub(crate) fn text_fragments<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    el.text().map(str::trim).filter(|t| !t.is_empty())
}

/// First element under `scope` matched by the ordered selector chain.
pub(crate) fn first_in_chain<'a>(scope: ElementRef<'a>, chain: &[Selector]) -> Option<ElementRef<'a>> {
    chain.iter().find_map(|sel| scope.select(sel).next())
}

/// First non-empty value produced by applying `read` along the chain.
pub(crate) fn first_text_in_chain<'a, F>(scope: ElementRef<'a>, chain: &[Selector], read: F) -> Option<String>
where
    F: Fn(ElementRef<'a>) -> String,
{
    chain
        .iter()
        .filter_map(|sel| scope.select(sel).next())
        .map(read)
        .find(|text| !text.is_empty())
}

/// `el` itself or its first descendant matching `sel`.
pub(crate) fn self_or_descendant<'a>(el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    if sel.matches(&el) {
        Some(el)
    } else {
        el.select(sel).next()
    }
}

/// Cells of a row. Nested cells are included.
pub(crate) fn cells<'a>(row: ElementRef<'a>, td: &Selector) -> Vec<ElementRef<'a>> {
    row.select(td).collect()
}

/// Nearest ancestor element of `el` named `name`.
pub(crate) fn ancestor_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == name)
}

/// Next sibling element named `name`.
pub(crate) fn next_sibling_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| sib.value().name() == name)
}

/// A text node located by content.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextHit<'a> {
    /// Element directly containing the text
    pub parent: Option<ElementRef<'a>>,
    /// First element after the text in document order
    pub next: Option<ElementRef<'a>>,
}

/// First text node under `scope` whose content satisfies `pred`.
pub(crate) fn find_text<'a, F>(scope: ElementRef<'a>, pred: F) -> Option<TextHit<'a>>
where
    F: Fn(&str) -> bool,
{
    let node = scope
        .descendants()
        .find(|n| n.value().as_text().is_some_and(|t| pred(&**t)))?;

    let mut next = None;
    let mut current = Some(node);
    'climb: while let Some(n) = current {
        for sib in n.next_siblings() {
            if let Some(el) = sib.descendants().find_map(ElementRef::wrap) {
                next = Some(el);
                break 'climb;
            }
        }
        current = n.parent();
    }

    Some(TextHit {
        parent: node.parent().and_then(ElementRef::wrap),
        next,
    })
}

/// Leading `max_chars` characters of `body`.
pub(crate) fn excerpt(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
