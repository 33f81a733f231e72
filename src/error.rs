use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No usable output filename: neither an override nor a `tunnus` parameter.
    #[error("{0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("signatures table not found on page")]
    MissingTable,

    #[error("row {row} has no cell at index {index}")]
    MissingCell { row: usize, index: usize },
}
