//! # Analysis Pipeline
//!
//! Runs the three stages once, in order: load the simulator logs, align and
//! derive metrics, render the chart. Each stage consumes the complete output
//! of the previous one and any failure aborts the run.

use analytics::{AnalyticsEngine, QuotingReport};
use charts::ChartRenderer;
use configuration::AnalysisConfig;
use std::path::{Path, PathBuf};

pub mod error;

pub use error::PipelineError;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub chart_path: PathBuf,
    pub summary_path: Option<PathBuf>,
    pub report: QuotingReport,
}

/// Runs the full analysis described by `config`.
///
/// No file is written unless loading and alignment succeeded, and the chart
/// is only written once all four panels have been drawn.
pub fn run(config: &AnalysisConfig) -> Result<RunOutcome, PipelineError> {
    // 1. Load
    let data = datasource::load_all(&config.inputs)?;

    // 2. Align & derive
    let analysis = AnalyticsEngine::new().analyze(&data)?;

    // 3. Render
    let renderer = ChartRenderer::new(&config.chart);
    renderer.render(&data, &analysis, &config.output.chart)?;

    if let Some(path) = &config.output.summary_path {
        write_summary(&analysis.report, path)?;
    }

    Ok(RunOutcome {
        chart_path: config.output.chart.clone(),
        summary_path: config.output.summary_path.clone(),
        report: analysis.report,
    })
}

fn write_summary(report: &QuotingReport, path: &Path) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| PipelineError::Summary {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(?path, "Summary written.");
    Ok(())
}
