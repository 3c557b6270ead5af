use crate::{error::SchemaError, schema::field::FieldSchema};
use std::sync::Arc;

/// The identity of a registered table. Fields point back to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableMeta {
    name: String,
    prefix: String,
    index: Option<u32>,
    alias: Option<String>,
    physical: String,
}

impl TableMeta {
    pub(crate) fn new(name: &str, prefix: &str, index: Option<u32>, alias: Option<&str>) -> Self {
        TableMeta {
            name: name.to_string(),
            prefix: prefix.to_string(),
            index,
            alias: alias.map(String::from),
            physical: physical_name(prefix, index),
        }
    }

    /// The logical name the table was registered under, e.g. `Clients`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The table identifier sent to the driver, e.g. `SC135`.
    pub fn physical_name(&self) -> &str {
        &self.physical
    }

    /// The name columns of this table are qualified with.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.physical)
    }
}

pub fn physical_name(prefix: &str, index: Option<u32>) -> String {
    match index {
        Some(index) => format!("{prefix}{index}"),
        None => prefix.to_string(),
    }
}

/// A registered table with its fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    meta: Arc<TableMeta>,
    fields: Vec<FieldSchema>,
}

impl TableSchema {
    pub(crate) fn new(meta: Arc<TableMeta>, fields: Vec<FieldSchema>) -> Self {
        TableSchema { meta, fields }
    }

    pub fn meta(&self) -> &Arc<TableMeta> {
        &self.meta
    }

    pub fn name(&self) -> &str {
        self.meta.name()
    }

    pub fn physical_name(&self) -> &str {
        self.meta.physical_name()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Result<&FieldSchema, SchemaError> {
        self.fields
            .iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| SchemaError::UnknownField {
                table: self.meta.name().to_string(),
                field: name.to_string(),
            })
    }
}
