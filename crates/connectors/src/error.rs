use std::time::Duration;
use thiserror::Error;

/// All errors coming from executing a query against a driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Opening the data source failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The driver rejected or failed the query.
    #[error("Driver error: {0}")]
    Driver(String),

    /// Placeholders and parameters disagree while inlining literals.
    #[error("Query has {placeholders} placeholders but {params} parameters were given")]
    ParameterCount { placeholders: usize, params: usize },

    /// A parameter has no literal form in the dialect.
    #[error("Cannot inline parameter: {0}")]
    Literal(String),

    /// A returned row is narrower or wider than the projection.
    #[error("Row has {found} columns, projection expects {expected}")]
    RowArity { expected: usize, found: usize },

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

/// Text could not be moved between the client and on-disk character sets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Cannot encode {text:?} into {charset}")]
    Unmappable { charset: String, text: String },

    #[error("Malformed {charset} text: {detail}")]
    Malformed { charset: String, detail: String },
}
