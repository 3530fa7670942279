use crate::error::AnalyticsError;
use core_types::{BookRecord, MergedRecord, QuoteRecord, SpreadRecord};

/// Appends `ask_price - bid_price` to every quote row.
pub fn compute_spreads(quotes: &[QuoteRecord]) -> Vec<SpreadRecord> {
    quotes
        .iter()
        .map(|q| SpreadRecord {
            timestamp: q.timestamp,
            spread: q.spread(),
        })
        .collect()
}

/// Pairs every quote with the book row nearest to it in time.
///
/// Both slices must be sorted by timestamp ascending (the loader enforces
/// this). The output has exactly one row per quote, in quote order.
///
/// Ties follow a nearest as-of join: the backward candidate is the last book
/// row at or before the quote, the forward candidate is the first at or after
/// it, and the backward one wins when the distances are equal.
pub fn nearest_join(
    quotes: &[QuoteRecord],
    book: &[BookRecord],
) -> Result<Vec<MergedRecord>, AnalyticsError> {
    if quotes.is_empty() {
        return Ok(Vec::new());
    }
    if book.is_empty() {
        return Err(AnalyticsError::EmptyBook {
            quotes: quotes.len(),
        });
    }

    let merged: Vec<MergedRecord> = quotes
        .iter()
        .map(|quote| {
            let idx = nearest_index(book, quote.timestamp);
            MergedRecord::new(quote, &book[idx])
        })
        .collect();

    tracing::debug!(
        quotes = quotes.len(),
        book = book.len(),
        "Aligned quotes onto book snapshots."
    );
    Ok(merged)
}

/// Index of the book row nearest to `t`. `book` must be non-empty.
fn nearest_index(book: &[BookRecord], t: f64) -> usize {
    // First row strictly after `t`; the row before it is the last one <= t.
    let after = book.partition_point(|b| b.timestamp <= t);
    // First row at or after `t`.
    let forward = book.partition_point(|b| b.timestamp < t);

    let backward = after.checked_sub(1);
    let forward = (forward < book.len()).then_some(forward);

    match (backward, forward) {
        (Some(b), Some(f)) => {
            let back_diff = t - book[b].timestamp;
            let fwd_diff = book[f].timestamp - t;
            if back_diff <= fwd_diff { b } else { f }
        }
        (Some(b), None) => b,
        (None, Some(f)) => f,
        // Unreachable for a non-empty book.
        (None, None) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn book_row(timestamp: f64, mid_price: f64, inventory: f64) -> BookRecord {
        BookRecord {
            timestamp,
            mid_price,
            inventory,
        }
    }

    fn quote_at(timestamp: f64, reservation_price: f64) -> QuoteRecord {
        QuoteRecord {
            timestamp,
            bid_price: reservation_price - 0.2,
            ask_price: reservation_price + 0.2,
            reservation_price,
        }
    }

    /// Reference answer: minimize the distance, prefer the earlier row on a tie.
    fn brute_force(book: &[BookRecord], t: f64) -> f64 {
        let best = book
            .iter()
            .map(|b| (b.timestamp - t).abs())
            .fold(f64::INFINITY, f64::min);
        book.iter()
            .find(|b| (b.timestamp - t).abs() == best)
            .map(|b| b.timestamp)
            .unwrap()
    }

    #[test]
    fn reference_scenario_matches_later_book_row() {
        let book = vec![book_row(0.0, 100.0, 0.0), book_row(1.0, 101.0, 5.0)];
        let quotes = vec![QuoteRecord {
            timestamp: 0.9,
            bid_price: 100.4,
            ask_price: 100.8,
            reservation_price: 100.6,
        }];

        let merged = nearest_join(&quotes, &book).unwrap();
        let spreads = compute_spreads(&quotes);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].book_timestamp, 1.0);
        assert_eq!(merged[0].inventory, 5.0);
        assert!((merged[0].skew - (-0.4)).abs() < EPS);
        assert!((spreads[0].spread - 0.4).abs() < EPS);
    }

    #[test]
    fn equidistant_quote_takes_the_earlier_book_row() {
        let book = vec![book_row(0.0, 100.0, 0.0), book_row(1.0, 101.0, 5.0)];
        let merged = nearest_join(&[quote_at(0.5, 100.5)], &book).unwrap();

        assert_eq!(merged[0].book_timestamp, 0.0);
        assert_eq!(merged[0].mid_price, 100.0);
    }

    #[test]
    fn exact_match_on_duplicate_timestamps_takes_the_last_duplicate() {
        let book = vec![
            book_row(0.0, 100.0, 0.0),
            book_row(1.0, 101.0, 1.0),
            book_row(1.0, 101.5, 2.0),
            book_row(2.0, 102.0, 3.0),
        ];
        let merged = nearest_join(&[quote_at(1.0, 101.0)], &book).unwrap();

        assert_eq!(merged[0].inventory, 2.0);
        assert!((merged[0].skew - (-0.5)).abs() < EPS);
    }

    #[test]
    fn quotes_outside_the_book_range_clamp_to_the_edges() {
        let book = vec![book_row(10.0, 100.0, 0.0), book_row(20.0, 110.0, 1.0)];
        let merged = nearest_join(&[quote_at(-5.0, 99.0), quote_at(99.0, 111.0)], &book).unwrap();

        assert_eq!(merged[0].book_timestamp, 10.0);
        assert_eq!(merged[1].book_timestamp, 20.0);
    }

    #[test]
    fn every_quote_yields_exactly_one_row_in_quote_order() {
        let book: Vec<_> = (0..50)
            .map(|i| book_row(i as f64 * 0.7, 100.0 + i as f64, i as f64))
            .collect();
        let quotes: Vec<_> = (0..137)
            .map(|i| quote_at(i as f64 * 0.3 - 2.0, 100.0))
            .collect();

        let merged = nearest_join(&quotes, &book).unwrap();

        assert_eq!(merged.len(), quotes.len());
        for (q, m) in quotes.iter().zip(&merged) {
            assert_eq!(q.timestamp, m.timestamp);
            assert_eq!(m.book_timestamp, brute_force(&book, q.timestamp));
            assert!((m.skew - (m.reservation_price - m.mid_price)).abs() < EPS);
        }
    }

    #[test]
    fn book_row_shared_by_many_quotes_is_reused() {
        let book = vec![book_row(0.0, 100.0, 0.0), book_row(10.0, 105.0, 2.0)];
        let quotes = vec![quote_at(8.0, 104.0), quote_at(9.0, 104.5), quote_at(9.5, 105.0)];

        let merged = nearest_join(&quotes, &book).unwrap();

        assert!(merged.iter().all(|m| m.book_timestamp == 10.0));
    }

    #[test]
    fn empty_quotes_produce_empty_output() {
        assert!(nearest_join(&[], &[]).unwrap().is_empty());
        assert!(nearest_join(&[], &[book_row(0.0, 1.0, 0.0)]).unwrap().is_empty());
        assert!(compute_spreads(&[]).is_empty());
    }

    #[test]
    fn quotes_without_any_book_data_fail() {
        let err = nearest_join(&[quote_at(1.0, 100.0)], &[]).unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyBook { quotes: 1 }));
    }

    #[test]
    fn crossed_quotes_give_negative_spread() {
        let quotes = vec![QuoteRecord {
            timestamp: 0.0,
            bid_price: 101.0,
            ask_price: 100.0,
            reservation_price: 100.5,
        }];

        assert!((compute_spreads(&quotes)[0].spread - (-1.0)).abs() < EPS);
    }
}
