//! The table layouts every 1C v7 dBASE database ships with.
//!
//! Concrete reference books, documents and registers derive from these
//! families with their own index, e.g. `TableDecl::derive("Items", SC).index(156)`.

use crate::{
    error::SchemaError,
    schema::{
        decl::{FamilyDecl, TableDecl},
        registry::RegistryBuilder,
    },
};

/// The document journal.
pub const JOURNAL: &str = "Journal";
/// Long strings split into blocks.
pub const BLOB: &str = "Blob";
/// Reference books (`SC<n>`).
pub const SC: &str = "SC";
/// Document headers (`DH<n>`).
pub const DH: &str = "DH";
/// Document table parts (`DT<n>`).
pub const DT: &str = "DT";
/// Register totals (`RG<n>`).
pub const RG: &str = "RG";
/// Register movements (`RA<n>`).
pub const RA: &str = "RA";

pub fn register(builder: &mut RegistryBuilder) -> Result<(), SchemaError> {
    builder
        .table(
            TableDecl::new(JOURNAL, "1SJOURN")
                .alias(JOURNAL)
                .field("doc", "IDDOC")
                .field("docref", "IDDOCREF")
                .field("date", "DATE")
                .field("number", "DOCNO")
                .field("closed", "CLOSED")
                .field("ismark", "ISMARK"),
        )?
        .table(
            TableDecl::new(BLOB, "1SBLOB")
                .field("field_id", "FIELDID")
                .field("obj_id", "OBJID")
                .field("block_no", "BLOCKNO")
                .field("block", "BLOCK"),
        )?;

    builder
        .family(
            FamilyDecl::new(SC, "SC")
                .field("id", "ID")
                .field("code", "CODE")
                .field("description", "DESCR"),
        )?
        .family(FamilyDecl::new(DH, "DH").field_joined("doc", "IDDOC", JOURNAL, "doc"))?
        .family(
            FamilyDecl::new(DT, "DT")
                .field("doc", "IDDOC")
                .field("line", "LINENO"),
        )?
        .family(FamilyDecl::new(RG, "RG").field("period", "PERIOD"))?
        .family(
            FamilyDecl::new(RA, "RA")
                .field_joined("doc", "IDDOC", JOURNAL, "doc")
                .field("lineno", "LINENO"),
        )?;

    Ok(())
}
