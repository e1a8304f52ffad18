use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Payload carried in the `q` parameter of the results page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryPayload<'a> {
    item_name: &'a str,
    item_quantity_in_scu: Value,
}

/// Build the results-page URL for an item and quantity.
///
/// The payload `{"itemName": .., "itemQuantityInScu": ..}` is serialized as
/// JSON and percent-encoded into the `q` parameter. Pure and deterministic.
pub fn encode_query_url(base_url: &str, item_name: &str, quantity: f64) -> Result<String, AppError> {
    let payload = serde_json::to_string(&QueryPayload {
        item_name,
        item_quantity_in_scu: quantity_value(quantity),
    })?;
    Ok(format!(
        "{}?q={}",
        base_url.trim_end_matches('?'),
        urlencoding::encode(&payload)
    ))
}

/// Whole quantities are sent as JSON integers (`1`, not `1.0`).
fn quantity_value(quantity: f64) -> Value {
    // 2^64 itself is not representable as u64.
    if quantity.fract() == 0.0 && quantity >= 0.0 && quantity < u64::MAX as f64 {
        Value::from(quantity as u64)
    } else {
        Value::from(quantity)
    }
}
