//! The boundary between rendered queries and the legacy tabular drivers.

pub mod adapter;
pub mod driver;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod source;
