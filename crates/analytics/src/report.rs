use serde::{Deserialize, Serialize};

/// A summary of the maker's quoting behaviour over one simulation run.
///
/// This struct is the final output of the `AnalyticsEngine` next to the
/// aligned tables. Metrics over an empty series are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotingReport {
    // I. Table Sizes
    pub trade_count: usize,
    pub book_rows: usize,
    pub quote_rows: usize,
    /// Sum of the trade log's `quantity` column, if it has one.
    pub traded_volume: Option<f64>,

    // II. Quoted Spread
    pub mean_spread: Option<f64>,
    pub min_spread: Option<f64>,
    pub max_spread: Option<f64>,

    // III. Inventory
    pub final_inventory: Option<f64>,
    pub max_abs_inventory: Option<f64>,

    // IV. Skew (reservation - mid)
    pub mean_skew: Option<f64>,
    pub mean_abs_skew: Option<f64>,
    /// Average time between a quote and the book row it was matched with.
    pub mean_join_distance: Option<f64>,
}

impl QuotingReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }
}
