pub mod diagnostics;
pub mod error;
pub mod mapper;
pub mod options;
pub mod select;
pub mod session;
pub mod settings;
