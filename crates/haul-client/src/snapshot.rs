use haul_core::snapshot::{PageSnapshot, RowSnapshot};
use scraper::{ElementRef, Html, Selector};

const ROW_SELECTOR: &str = "table tr, div.row";
const HEADER_CELL_SELECTOR: &str = "th";
const SIZE_SELECTOR: &str = ".btn, [class*=\"size\"]";

/// Reduces rendered HTML to a [`PageSnapshot`].
///
/// Selectors are parsed once; a parser can be reused across pages.
#[derive(Debug, Clone)]
pub struct SnapshotParser {
    body: Selector,
    rows: Selector,
    header_cell: Selector,
    size: Selector,
}

impl SnapshotParser {
    pub fn new() -> Self {
        Self {
            body: parse_selector("body"),
            rows: parse_selector(ROW_SELECTOR),
            header_cell: parse_selector(HEADER_CELL_SELECTOR),
            size: parse_selector(SIZE_SELECTOR),
        }
    }

    pub fn parse(&self, html: &str) -> PageSnapshot {
        let document = Html::parse_document(html);

        let body_text = document
            .select(&self.body)
            .next()
            .map(text_content)
            .unwrap_or_default();

        let rows = document
            .select(&self.rows)
            .map(|row| RowSnapshot {
                text: text_content(row),
                has_header_cell: row.select(&self.header_cell).next().is_some(),
                size_labels: row.select(&self.size).map(text_content).collect(),
            })
            .collect();

        PageSnapshot { body_text, rows }
    }
}

impl Default for SnapshotParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Equivalent of DOM `textContent`: every descendant text node, concatenated.
fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect()
}

// Selectors are compile-time constants.
fn parse_selector(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector is valid")
}
