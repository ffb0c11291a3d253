//! Freshness filtering over normalized quotes.

use std::time::Duration;

use crate::{Quote, UtcDateTime};

/// Keeps only quotes whose `observed_at` is within `cutoff` of `now`.
///
/// `now` is injected so the aggregator evaluates freshness at decision
/// time and tests can pin it. Quotes timestamped in the future are kept:
/// they are not older than the cutoff.
pub fn filter_fresh(quotes: Vec<Quote>, cutoff: Duration, now: UtcDateTime) -> Vec<Quote> {
    let cutoff = time::Duration::try_from(cutoff).unwrap_or(time::Duration::MAX);
    let before = quotes.len();

    let fresh: Vec<Quote> = quotes
        .into_iter()
        .filter(|quote| quote.observed_at.age_at(now) <= cutoff)
        .collect();

    if fresh.len() < before {
        tracing::debug!(
            discarded = before - fresh.len(),
            "dropped stale quotes older than the freshness cutoff"
        );
    }

    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendor::VendorId;
    use crate::{Availability, Sku};

    fn quote_at(observed_at: &str) -> Quote {
        Quote::new(
            VendorId::Acme,
            Sku::parse("ABC123").expect("valid sku"),
            10.0,
            5,
            Availability::InStock,
            UtcDateTime::parse(observed_at).expect("valid timestamp"),
        )
        .expect("valid quote")
    }

    #[test]
    fn keeps_quotes_inside_the_cutoff() {
        let now = UtcDateTime::parse("2026-01-01T00:10:00Z").unwrap();
        let fresh = filter_fresh(
            vec![quote_at("2026-01-01T00:05:00Z")],
            Duration::from_secs(600),
            now,
        );
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn drops_quotes_older_than_the_cutoff() {
        let now = UtcDateTime::parse("2026-01-01T00:20:01Z").unwrap();
        let fresh = filter_fresh(
            vec![quote_at("2026-01-01T00:10:00Z")],
            Duration::from_secs(600),
            now,
        );
        assert!(fresh.is_empty());
    }

    #[test]
    fn boundary_age_is_still_fresh() {
        let now = UtcDateTime::parse("2026-01-01T00:10:00Z").unwrap();
        let fresh = filter_fresh(
            vec![quote_at("2026-01-01T00:00:00Z")],
            Duration::from_secs(600),
            now,
        );
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn future_timestamps_are_kept() {
        let now = UtcDateTime::parse("2026-01-01T00:00:00Z").unwrap();
        let fresh = filter_fresh(
            vec![quote_at("2026-01-01T00:01:00Z")],
            Duration::from_secs(600),
            now,
        );
        assert_eq!(fresh.len(), 1);
    }
}
