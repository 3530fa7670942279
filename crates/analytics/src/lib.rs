//! # Quote Analytics
//!
//! This crate turns the loaded simulator logs into analysis-ready tables:
//! the quoted spread per quote, and every quote aligned with the book
//! snapshot nearest to it in time together with its skew
//! (`reservation_price - mid_price`).
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O. It depends only on `core-types`.
//! - **Stateless calculation:** `AnalyticsEngine` takes the logs and returns
//!   an `Analysis`. Row order is preserved and the merged table always has
//!   one row per quote.
//!
//! ## Public API
//!
//! - `AnalyticsEngine` / `Analysis`: alignment plus summary in one call.
//! - `compute_spreads`, `nearest_join`: the individual derivations.
//! - `QuotingReport`: the summary metrics printed after a run.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod aligner;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use aligner::{compute_spreads, nearest_join};
pub use engine::{Analysis, AnalyticsEngine};
pub use error::AnalyticsError;
pub use report::QuotingReport;
