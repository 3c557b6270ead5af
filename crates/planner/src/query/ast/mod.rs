pub mod common;
pub mod select;
