//! # Simulator Log Loader
//!
//! Reads the three CSV logs written by the market-making simulator into typed,
//! in-memory tables.
//!
//! ## Guarantees
//!
//! - **Typed rows:** `book.csv` and `quotes.csv` become `BookRecord` and
//!   `QuoteRecord` vectors. Required columns are checked against the header
//!   before any row is read; extra columns are ignored.
//! - **Numeric timestamps:** every timestamp must parse as a finite `f64`.
//! - **Source order:** rows are never re-sorted. A timestamp that goes
//!   backwards is rejected instead.
//! - **Fail-fast:** any problem is a `LoadError`, and nothing is returned for
//!   the other tables.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;

// Re-export the key components to create a clean, public-facing API.
pub use error::LoadError;
pub use loader::{load_all, load_book, load_quotes, load_trades};
