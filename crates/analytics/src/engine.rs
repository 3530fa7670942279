use crate::aligner::{compute_spreads, nearest_join};
use crate::error::AnalyticsError;
use crate::report::QuotingReport;
use core_types::{BookRecord, MarketData, MergedRecord, SpreadRecord, TradeLog};

/// Analysis-ready tables plus the summary derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// One row per quote, in quote order.
    pub spreads: Vec<SpreadRecord>,
    /// One row per quote, each paired with its nearest book row.
    pub merged: Vec<MergedRecord>,
    pub report: QuotingReport,
}

/// A stateless calculator for deriving quoting diagnostics from the
/// simulator logs.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for aligning the logs and computing metrics.
    ///
    /// # Arguments
    ///
    /// * `data` - The three loaded logs. Book and quotes must be time-sorted.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Analysis` or an `AnalyticsError`.
    pub fn analyze(&self, data: &MarketData) -> Result<Analysis, AnalyticsError> {
        let spreads = compute_spreads(&data.quotes);
        let merged = nearest_join(&data.quotes, &data.book)?;

        let mut report = QuotingReport::new();
        report.quote_rows = data.quotes.len();

        self.calculate_trade_metrics(&data.trades, &mut report);
        self.calculate_spread_metrics(&spreads, &mut report);
        self.calculate_inventory_metrics(&data.book, &mut report);
        self.calculate_skew_metrics(&merged, &mut report);

        tracing::info!(
            quotes = merged.len(),
            mean_spread = ?report.mean_spread,
            mean_skew = ?report.mean_skew,
            "Derived spread and skew."
        );

        Ok(Analysis {
            spreads,
            merged,
            report,
        })
    }

    fn calculate_trade_metrics(&self, trades: &TradeLog, report: &mut QuotingReport) {
        report.trade_count = trades.len();
        report.traded_volume = trades
            .numeric_column("quantity")
            .map(|quantities| quantities.iter().sum());
    }

    fn calculate_spread_metrics(&self, spreads: &[SpreadRecord], report: &mut QuotingReport) {
        let values: Vec<f64> = spreads.iter().map(|s| s.spread).collect();

        report.mean_spread = mean(&values);
        report.min_spread = values.iter().copied().reduce(f64::min);
        report.max_spread = values.iter().copied().reduce(f64::max);
    }

    fn calculate_inventory_metrics(&self, book: &[BookRecord], report: &mut QuotingReport) {
        report.book_rows = book.len();
        report.final_inventory = book.last().map(|b| b.inventory);
        report.max_abs_inventory = book.iter().map(|b| b.inventory.abs()).reduce(f64::max);
    }

    fn calculate_skew_metrics(&self, merged: &[MergedRecord], report: &mut QuotingReport) {
        let skews: Vec<f64> = merged.iter().map(|m| m.skew).collect();
        let abs_skews: Vec<f64> = skews.iter().map(|s| s.abs()).collect();
        let distances: Vec<f64> = merged.iter().map(MergedRecord::join_distance).collect();

        report.mean_skew = mean(&skews);
        report.mean_abs_skew = mean(&abs_skews);
        report.mean_join_distance = mean(&distances);
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
