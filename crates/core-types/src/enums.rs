use std::fmt;

/// The three logs written by the market-making simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Trades,
    Book,
    Quotes,
}

impl TableKind {
    /// Returns the columns a table must carry for the analysis to run.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            // The trade log is opaque; only its tabular shape matters.
            TableKind::Trades => &[],
            TableKind::Book => &["timestamp", "mid_price", "inventory"],
            TableKind::Quotes => &["timestamp", "bid_price", "ask_price", "reservation_price"],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Trades => "trades",
            TableKind::Book => "book",
            TableKind::Quotes => "quotes",
        };
        f.write_str(name)
    }
}
