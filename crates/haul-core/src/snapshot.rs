//! Plain-data view of a rendered results page.
//!
//! Rendering engines produce a [`PageSnapshot`]; the extraction logic only
//! ever sees this structure, never a live DOM.

use serde::{Deserialize, Serialize};

/// Rendered page reduced to what the extractor needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// Text content of `<body>`.
    pub body_text: String,
    /// Candidate result rows (`table tr`, `div.row`) in document order.
    pub rows: Vec<RowSnapshot>,
}

/// One candidate result row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSnapshot {
    /// Raw, untrimmed text content of the row.
    pub text: String,
    /// Whether the row contains a `<th>` cell.
    pub has_header_cell: bool,
    /// Text of size-button descendants (`.btn`, `[class*="size"]`), in order.
    pub size_labels: Vec<String>,
}

impl RowSnapshot {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn header(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            has_header_cell: true,
            size_labels: Vec::new(),
        }
    }

    pub fn with_sizes<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.size_labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

impl PageSnapshot {
    /// Build a snapshot whose body text is the concatenation of its rows.
    pub fn from_rows(rows: Vec<RowSnapshot>) -> Self {
        let body_text = rows
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Self { body_text, rows }
    }

    /// A page that shows only the given text and no rows.
    pub fn text_only(body_text: impl Into<String>) -> Self {
        Self {
            body_text: body_text.into(),
            rows: Vec::new(),
        }
    }
}
