use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Cannot align {quotes} quotes: the book table is empty")]
    EmptyBook { quotes: usize },
}
