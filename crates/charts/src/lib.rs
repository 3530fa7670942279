//! # Quote Charts
//!
//! Renders the fixed 4-panel summary of a market-making run: prices and
//! quotes, quoted spread, inventory, and inventory-driven skew, stacked
//! vertically on one shared time axis and saved as a PNG.

pub mod error;
pub mod panels;
pub mod renderer;

pub use error::RenderError;
pub use panels::{Panel, Series, Stroke, build_panels, shared_x_range};
pub use renderer::ChartRenderer;
