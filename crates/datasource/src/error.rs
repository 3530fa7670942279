use core_types::TableKind;
use std::path::PathBuf;
use thiserror::Error;

/// Every way an input log can be unavailable or malformed.
///
/// All variants belong to the same fatal tier: the run stops without
/// attempting a partial analysis.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open {table} log {path:?}: {source}")]
    Io {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {table} log {path:?}: {source}")]
    Csv {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{table} log {path:?} has no header row")]
    Empty { table: TableKind, path: PathBuf },

    #[error("{table} log {path:?} is missing required column '{column}'")]
    MissingColumn {
        table: TableKind,
        path: PathBuf,
        column: &'static str,
    },

    #[error("{table} log {path:?} line {line}: timestamp '{value}' is not a finite number")]
    InvalidTimestamp {
        table: TableKind,
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error(
        "{table} log {path:?} line {line}: timestamp {current} precedes {previous}; input must be sorted by time"
    )]
    Unordered {
        table: TableKind,
        path: PathBuf,
        line: u64,
        previous: f64,
        current: f64,
    },
}
