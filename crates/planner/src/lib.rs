pub mod error;
pub mod expr;
pub mod query;
pub mod schema;
