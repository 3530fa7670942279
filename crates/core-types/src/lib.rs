pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::TableKind;
pub use structs::{BookRecord, MarketData, MergedRecord, QuoteRecord, SpreadRecord, Timestamped, TradeLog};
