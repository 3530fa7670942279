use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The single setup tier: an input log is missing or malformed.
    #[error("Error reading CSVs: {0}")]
    Load(#[from] datasource::LoadError),

    #[error("Alignment error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Rendering error: {0}")]
    Render(#[from] charts::RenderError),

    #[error("Failed to write summary {path:?}: {source}")]
    Summary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize summary: {0}")]
    SummaryFormat(#[from] serde_json::Error),
}
