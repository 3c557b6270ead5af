use connectors::error::ExecutionError;
use model::error::RecordError;
use planner::error::{QueryBuildError, SchemaError};
use thiserror::Error;

/// Everything a caller of a query terminal can see.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Build(#[from] QueryBuildError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// `one` ran against an empty result.
    #[error("No rows returned by query: {0}")]
    NotFound(String),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Record(#[from] RecordError),
}
