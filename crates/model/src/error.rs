use thiserror::Error;

/// Errors raised while reading values out of a `Record`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// No column with this display name was projected.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// The column holds something that cannot be read as a number.
    #[error("Column {column} is not numeric: {value}")]
    NotNumeric { column: String, value: String },

    /// The column does not hold text.
    #[error("Column {0} is not text")]
    NotText(String),
}

/// Errors raised while decoding legacy document identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid base-36 number: {0:?}")]
    InvalidBase36(String),
}
