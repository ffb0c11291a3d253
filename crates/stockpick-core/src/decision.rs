//! Best-vendor selection over fresh, normalized quotes.

use crate::domain::{Availability, Quote};

/// Relative price band within which a better-stocked vendor may beat the
/// cheapest one. Exactly 10% is inside the band.
pub const PRICE_TOLERANCE: f64 = 0.10;

/// Picks the winning quote, or `None` when no candidate has stock.
///
/// 1. Quotes with zero stock or OUT_OF_STOCK status are discarded.
/// 2. The cheapest candidate wins by default (price ties broken by the
///    fixed vendor priority order).
/// 3. Candidates priced within [`PRICE_TOLERANCE`] of the minimum that
///    carry more stock than the cheapest displace it; among those the
///    highest stock wins, ties broken by lower price, then vendor
///    priority.
///
/// The band is computed once against the global minimum — not pairwise —
/// so the result is independent of input order.
pub fn select_best(quotes: &[Quote]) -> Option<&Quote> {
    let candidates: Vec<&Quote> = quotes
        .iter()
        .filter(|quote| quote.stock > 0 && quote.status == Availability::InStock)
        .collect();

    let cheapest = candidates.iter().copied().min_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.vendor.priority().cmp(&b.vendor.priority()))
    })?;

    let p_min = cheapest.price;
    let within_band = |quote: &Quote| (quote.price - p_min) / p_min <= PRICE_TOLERANCE;

    let best_stocked = candidates
        .iter()
        .copied()
        .filter(|quote| within_band(quote) && quote.stock > cheapest.stock)
        .max_by(|a, b| {
            a.stock
                .cmp(&b.stock)
                .then_with(|| b.price.total_cmp(&a.price))
                .then_with(|| b.vendor.priority().cmp(&a.vendor.priority()))
        });

    Some(best_stocked.unwrap_or(cheapest))
}
