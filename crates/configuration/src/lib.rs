use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalysisConfig, ChartSettings, InputPaths, OutputPaths};

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "analysis";

/// Prefix for environment overrides, e.g. `QUOTE_ANALYZER_INPUTS__BOOK`.
pub const ENV_PREFIX: &str = "QUOTE_ANALYZER";

/// Loads the analysis configuration.
///
/// Sources are layered in this order, later ones winning:
/// 1. the built-in defaults of `AnalysisConfig`,
/// 2. `explicit` if given (it must exist), otherwise an optional
///    `analysis.toml` in the working directory,
/// 3. environment variables prefixed with `QUOTE_ANALYZER_`.
pub fn load_config(explicit: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    let file = match explicit {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config = builder.try_deserialize::<AnalysisConfig>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Rejects settings the renderer cannot work with.
pub fn validate(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if config.chart.width == 0 || config.chart.height == 0 {
        return Err(ConfigError::ValidationError(format!(
            "chart dimensions must be positive, got {}x{}",
            config.chart.width, config.chart.height
        )));
    }
    if config.output.chart.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.chart must not be empty".to_string(),
        ));
    }
    Ok(())
}
