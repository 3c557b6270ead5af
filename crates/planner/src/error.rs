use thiserror::Error;

/// Malformed or unresolved schema declarations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A table or family was declared without a prefix.
    #[error("Missing prefix for table: {0}")]
    MissingPrefix(String),

    /// Two tables or two families share a name.
    #[error("Duplicate declaration: {0}")]
    DuplicateName(String),

    /// A declaration lists the same field name twice.
    #[error("Duplicate field {field} in {table}")]
    DuplicateField { table: String, field: String },

    /// A table derives from a family that was never declared.
    #[error("Unknown family {family} for table {table}")]
    UnknownFamily { table: String, family: String },

    /// A join target names a table or field that does not exist.
    #[error("Unresolved join target {target} for {table}.{field}")]
    UnresolvedJoin {
        table: String,
        field: String,
        target: String,
    },

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Unknown field {field} in {table}")]
    UnknownField { table: String, field: String },
}

/// Invalid query shapes, detected before anything reaches a driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryBuildError {
    /// NULL may only be compared with `=` or `<>`.
    #[error("Cannot compare {field} with NULL using {op}")]
    InvalidNullComparison { field: String, op: String },

    /// The operator does not accept this kind of operand.
    #[error("Operator {op} cannot take the operand given for {field}")]
    OperandMismatch { field: String, op: String },

    #[error("Empty IN list for {0}")]
    EmptyInList(String),

    #[error("Empty OR group")]
    EmptyDisjunction,

    #[error("Query selects no columns")]
    EmptyProjection,

    /// `extend` was called on a field declared without a join target.
    #[error("Field {0} has no join target")]
    NoJoinTarget(String),

    /// The key of a keyed result must be projected without a transform.
    #[error("Key field {0} is not in the projection")]
    KeyNotProjected(String),

    /// NaN and the infinities cannot be written as SQL literals.
    #[error("Value {0} has no SQL literal form")]
    NonFiniteLiteral(String),
}
