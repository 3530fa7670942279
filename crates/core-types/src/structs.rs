use serde::{Deserialize, Serialize};

/// Anything that sits on the shared time axis.
pub trait Timestamped {
    fn timestamp(&self) -> f64;
}

/// One snapshot of the reference book and the maker's state.
///
/// Extra columns in `book.csv` (e.g. `best_bid`, `best_ask`) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub timestamp: f64,
    pub mid_price: f64,
    pub inventory: f64,
}

/// One quote update issued by the maker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub timestamp: f64,
    pub bid_price: f64,
    pub ask_price: f64,
    pub reservation_price: f64,
}

impl QuoteRecord {
    /// Quoted spread. Not validated: crossed quotes give a negative value.
    pub fn spread(&self) -> f64 {
        self.ask_price - self.bid_price
    }
}

/// A quote row extended with its derived spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpreadRecord {
    pub timestamp: f64,
    pub spread: f64,
}

/// A quote paired with the book snapshot nearest to it in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MergedRecord {
    pub timestamp: f64,
    pub bid_price: f64,
    pub ask_price: f64,
    pub reservation_price: f64,
    /// Timestamp of the matched book row.
    pub book_timestamp: f64,
    pub mid_price: f64,
    pub inventory: f64,
    /// `reservation_price - mid_price`
    pub skew: f64,
}

impl MergedRecord {
    pub fn new(quote: &QuoteRecord, book: &BookRecord) -> Self {
        Self {
            timestamp: quote.timestamp,
            bid_price: quote.bid_price,
            ask_price: quote.ask_price,
            reservation_price: quote.reservation_price,
            book_timestamp: book.timestamp,
            mid_price: book.mid_price,
            inventory: book.inventory,
            skew: quote.reservation_price - book.mid_price,
        }
    }

    /// Absolute time distance between the quote and its matched book row.
    pub fn join_distance(&self) -> f64 {
        (self.timestamp - self.book_timestamp).abs()
    }
}

/// The executed-trade log, kept as raw rows.
///
/// Nothing in the analysis depends on its schema, so columns are only looked
/// up by name when a caller asks for one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeLog {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TradeLog {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Numeric values of a named column. Cells that are missing or do not
    /// parse as `f64` are skipped.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row.get(idx))
                .filter_map(|cell| cell.trim().parse::<f64>().ok())
                .collect(),
        )
    }
}

/// The three simulator logs as loaded from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    pub trades: TradeLog,
    pub book: Vec<BookRecord>,
    pub quotes: Vec<QuoteRecord>,
}

impl Timestamped for BookRecord {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

impl Timestamped for QuoteRecord {
    fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_record_derives_skew_from_matched_book_row() {
        let quote = QuoteRecord {
            timestamp: 0.9,
            bid_price: 100.4,
            ask_price: 100.8,
            reservation_price: 100.6,
        };
        let book = BookRecord {
            timestamp: 1.0,
            mid_price: 101.0,
            inventory: 5.0,
        };

        let merged = MergedRecord::new(&quote, &book);

        assert!((merged.skew - (-0.4)).abs() < 1e-9);
        assert!((quote.spread() - 0.4).abs() < 1e-9);
        assert!((merged.join_distance() - 0.1).abs() < 1e-9);
        assert_eq!(merged.inventory, 5.0);
    }

    #[test]
    fn trade_log_numeric_column_skips_unparseable_cells() {
        let log = TradeLog {
            headers: vec!["timestamp".into(), "price".into(), "quantity".into()],
            rows: vec![
                vec!["1".into(), "100".into(), "3".into()],
                vec!["2".into(), "101".into(), "n/a".into()],
                vec!["3".into(), "102".into(), " 2.5".into()],
            ],
        };

        assert_eq!(log.numeric_column("quantity"), Some(vec![3.0, 2.5]));
        assert_eq!(log.numeric_column("side"), None);
        assert_eq!(log.len(), 3);
    }
}
