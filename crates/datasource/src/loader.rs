use crate::error::LoadError;
use configuration::InputPaths;
use core_types::{BookRecord, MarketData, QuoteRecord, TableKind, Timestamped, TradeLog};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Loads all three simulator logs, failing on the first unusable one.
pub fn load_all(paths: &InputPaths) -> Result<MarketData, LoadError> {
    let trades = load_trades(&paths.trades)?;
    let book = load_book(&paths.book)?;
    let quotes = load_quotes(&paths.quotes)?;

    tracing::info!(
        trades = trades.len(),
        book = book.len(),
        quotes = quotes.len(),
        "Loaded simulator logs."
    );

    Ok(MarketData { trades, book, quotes })
}

/// Loads the trade log as raw rows. Only its tabular shape is checked.
pub fn load_trades(path: &Path) -> Result<TradeLog, LoadError> {
    let kind = TableKind::Trades;
    let (mut reader, headers) = open(kind, path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(kind, path, source))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(TradeLog {
        headers: headers.iter().map(str::to_string).collect(),
        rows,
    })
}

/// Loads `book.csv` into typed rows.
pub fn load_book(path: &Path) -> Result<Vec<BookRecord>, LoadError> {
    load_table(TableKind::Book, path)
}

/// Loads `quotes.csv` into typed rows.
pub fn load_quotes(path: &Path) -> Result<Vec<QuoteRecord>, LoadError> {
    load_table(TableKind::Quotes, path)
}

/// Reads a time-ordered table whose rows deserialize into `T`.
///
/// The timestamp cell is checked separately before deserialization so a
/// non-numeric timestamp is reported as such rather than as a generic
/// field error. Rows keep their source order.
fn load_table<T>(kind: TableKind, path: &Path) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned + Timestamped,
{
    let (mut reader, headers) = open(kind, path)?;
    require_columns(kind, path, &headers)?;

    // `require_columns` guarantees every time-ordered table has one.
    let ts_index = headers
        .iter()
        .position(|h| h == "timestamp")
        .ok_or_else(|| LoadError::MissingColumn {
            table: kind,
            path: path.to_path_buf(),
            column: "timestamp",
        })?;

    let mut rows: Vec<T> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| csv_error(kind, path, source))?;
        let line = line_of(&record);

        let raw_ts = record.get(ts_index).unwrap_or_default();
        match raw_ts.parse::<f64>() {
            Ok(ts) if ts.is_finite() => {}
            _ => {
                return Err(LoadError::InvalidTimestamp {
                    table: kind,
                    path: path.to_path_buf(),
                    line,
                    value: raw_ts.to_string(),
                });
            }
        }

        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|source| csv_error(kind, path, source))?;

        if let Some(previous) = rows.last().map(Timestamped::timestamp) {
            if row.timestamp() < previous {
                return Err(LoadError::Unordered {
                    table: kind,
                    path: path.to_path_buf(),
                    line,
                    previous,
                    current: row.timestamp(),
                });
            }
        }
        rows.push(row);
    }

    tracing::debug!(table = %kind, rows = rows.len(), ?path, "Table loaded.");
    Ok(rows)
}

fn open(kind: TableKind, path: &Path) -> Result<(csv::Reader<File>, StringRecord), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        table: kind,
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| csv_error(kind, path, source))?
        .clone();

    if headers.is_empty() {
        return Err(LoadError::Empty {
            table: kind,
            path: path.to_path_buf(),
        });
    }

    Ok((reader, headers))
}

fn require_columns(kind: TableKind, path: &Path, headers: &StringRecord) -> Result<(), LoadError> {
    for &column in kind.required_columns() {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                table: kind,
                path: path.to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

fn csv_error(kind: TableKind, path: &Path, source: csv::Error) -> LoadError {
    LoadError::Csv {
        table: kind,
        path: path.to_path_buf(),
        source,
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}
