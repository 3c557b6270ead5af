use connectors::{driver::Row, error::ExecutionError};
use model::records::record::Record;
use planner::schema::field::FieldSchema;

/// Zips positional rows against a projection into named records.
///
/// Each column is keyed by its field's display name: the alias when one
/// was given, `Table.field` otherwise. Values are taken as the engine
/// delivered them; text transcoding happens below this layer.
#[derive(Debug, Clone)]
pub struct ResultMapper {
    names: Vec<String>,
}

impl ResultMapper {
    pub fn new(columns: &[FieldSchema]) -> Self {
        ResultMapper {
            names: columns.iter().map(FieldSchema::display_name).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn check(&self, row: &Row) -> Result<(), ExecutionError> {
        if row.len() != self.names.len() {
            return Err(ExecutionError::RowArity {
                expected: self.names.len(),
                found: row.len(),
            });
        }
        Ok(())
    }

    /// Two columns sharing a display name collapse into one entry holding
    /// the later value.
    pub fn map(&self, row: Row) -> Result<Record, ExecutionError> {
        self.check(&row)?;
        let mut record = Record::with_capacity(row.len());
        for (name, value) in self.names.iter().zip(row) {
            record.insert(name.clone(), value);
        }
        Ok(record)
    }
}
