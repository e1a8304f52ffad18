use crate::error::AppError;
use crate::extract::MAX_OFFERS;
use crate::models::{ItemQuery, LookupResult, SellOffer};

/// Assemble the final result from offers in page order.
///
/// The page order is taken as the ranking; no re-sorting happens here. At
/// most [`MAX_OFFERS`] offers are kept, and the first one prices the total.
pub fn build_result(query: &ItemQuery, mut offers: Vec<SellOffer>) -> Result<LookupResult, AppError> {
    offers.truncate(MAX_OFFERS);
    let best = offers
        .first()
        .ok_or_else(|| AppError::ParsingError("no offers to rank".into()))?;

    let total_profit = total_profit(best.price, query.quantity);
    let container_size_options = best.container_sizes.clone();
    let message = summary_message(query, &offers);

    Ok(LookupResult {
        item: query.item_name.clone(),
        quantity: query.quantity,
        best_sell_locations: offers,
        total_profit,
        message,
        container_size_options,
    })
}

/// Price times quantity, rounded to whole UEC.
pub fn total_profit(price: u64, quantity: f64) -> u64 {
    (price as f64 * quantity).round() as u64
}

/// Returns true if prices never increase down the list.
pub fn is_price_descending(offers: &[SellOffer]) -> bool {
    offers.windows(2).all(|pair| pair[0].price >= pair[1].price)
}

fn summary_message(query: &ItemQuery, offers: &[SellOffer]) -> String {
    let mut message = format!(
        "Here are the top {} places to sell {} SCU of {}:",
        offers.len(),
        query.quantity,
        query.item_name
    );
    for (rank, offer) in offers.iter().enumerate() {
        message.push('\n');
        message.push_str(&offer_line(rank + 1, offer));
    }
    message
}

fn offer_line(rank: usize, offer: &SellOffer) -> String {
    let place = match (offer.system, offer.location.is_empty()) {
        (Some(system), true) => format!(" ({system})"),
        (Some(system), false) => format!(" ({system} > {})", offer.location),
        (None, _) => String::new(),
    };
    format!("{rank}. {}{place} - {} UEC", offer.shop, offer.price)
}
