//! Table and column declarations.
//!
//! Schemas are declared through a `RegistryBuilder`, then frozen into a
//! read-only `SchemaRegistry` that queries borrow from.

pub mod decl;
pub mod field;
pub mod registry;
pub mod standard;
pub mod table;

pub use decl::{FamilyDecl, FieldDecl, TableDecl};
pub use field::{FieldRef, FieldSchema, Transform};
pub use registry::{RegistryBuilder, SchemaRegistry};
pub use table::{TableMeta, TableSchema, physical_name};
