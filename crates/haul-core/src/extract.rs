//! Turns a rendered results page into typed sell offers.
//!
//! The pipeline is: filter candidate rows, de-duplicate by trimmed text
//! (first seen wins, capped at [`MAX_OFFERS`]), then parse every survivor
//! into a [`SellOffer`]. Sub-fields that cannot be parsed degrade to empty
//! strings, zero, or the default container sizes; a row is never dropped
//! because one of its fields is malformed.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;
use crate::models::{DEFAULT_CONTAINER_SIZES, SellOffer, StarSystem};
use crate::snapshot::{PageSnapshot, RowSnapshot};

/// Maximum number of offers kept from a results page.
pub const MAX_OFFERS: usize = 3;

/// Phrases the results page shows when nothing buys the item.
pub const NO_RESULTS_PHRASES: [&str; 2] = ["No results found", "No matching records found"];

const CURRENCY_TOKEN: &str = "UEC";
const FILTER_HINT: &str = "Use the filters to see different results";
const MIN_ROW_CHARS: usize = 5;

static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*UEC").expect("price pattern is valid"));

static PRICE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"¤\d+\s*UEC").expect("price segment pattern is valid"));

// <shop> <system> [> <location>], with <system> drawn from StarSystem::ALL.
static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    let systems = StarSystem::ALL
        .iter()
        .map(|s| regex::escape(s.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"^(?<shop>.*?)\s+(?<system>{systems})(?:\s+>\s+(?<location>.+))?$"
    ))
    .expect("location pattern is valid")
});

/// Returns true if the page states that the item has no buyers.
pub fn shows_no_results(page: &PageSnapshot) -> bool {
    NO_RESULTS_PHRASES
        .iter()
        .any(|phrase| page.body_text.contains(phrase))
}

/// Extract up to [`MAX_OFFERS`] offers in page order.
///
/// Returns [`AppError::ParsingError`] when no row survives filtering: the
/// page rendered, but not in a shape the heuristics recognise.
pub fn extract_offers(page: &PageSnapshot) -> Result<Vec<SellOffer>, AppError> {
    let offers: Vec<SellOffer> = unique_rows(page)
        .into_iter()
        .map(|row| parse_offer(row.text.trim(), &row.size_labels))
        .collect();

    if offers.is_empty() {
        return Err(AppError::ParsingError(format!(
            "none of {} candidate rows looked like a sell offer",
            page.rows.len()
        )));
    }

    Ok(offers)
}

fn is_offer_row(row: &RowSnapshot) -> bool {
    !row.has_header_cell && row.text.contains(CURRENCY_TOKEN) && !row.text.contains(FILTER_HINT)
}

fn unique_rows(page: &PageSnapshot) -> Vec<&RowSnapshot> {
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(MAX_OFFERS);

    for row in page.rows.iter().filter(|r| is_offer_row(r)) {
        let text = row.text.trim();
        if text.chars().count() < MIN_ROW_CHARS || !seen.insert(text) {
            continue;
        }
        unique.push(row);
        if unique.len() == MAX_OFFERS {
            break;
        }
    }

    unique
}

/// Parse one trimmed row text plus its size-button labels into an offer.
pub fn parse_offer(text: &str, size_labels: &[String]) -> SellOffer {
    let price = PRICE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .unwrap_or(0);

    let location_text = PRICE_SEGMENT.replace(text, "");
    let location_text = location_text.trim();

    let (shop, system, location) = match LOCATION.captures(location_text) {
        Some(caps) => (
            caps["shop"].trim().to_string(),
            StarSystem::from_name(&caps["system"]),
            caps.name("location")
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        ),
        None => (location_text.to_string(), None, String::new()),
    };

    SellOffer {
        shop,
        system,
        location,
        price,
        container_sizes: parse_container_sizes(size_labels),
    }
}

fn parse_container_sizes(labels: &[String]) -> Vec<u32> {
    let mut sizes = Vec::new();
    for size in labels.iter().filter_map(|l| leading_integer(l)) {
        if size > 0 && !sizes.contains(&size) {
            sizes.push(size);
        }
    }

    if sizes.is_empty() {
        DEFAULT_CONTAINER_SIZES.to_vec()
    } else {
        sizes
    }
}

/// Leading run of digits after trimming, e.g. `"16 SCU"` -> 16.
fn leading_integer(label: &str) -> Option<u32> {
    let label = label.trim();
    let end = label
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(label.len());
    label[..end].parse().ok()
}
