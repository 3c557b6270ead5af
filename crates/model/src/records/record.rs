use crate::{core::value::Value, error::RecordError};
use bigdecimal::BigDecimal;
use serde::{Serialize, ser::SerializeMap};

/// One result row keyed by display name, in projection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Sets a column. A name that is already present keeps its position
    /// and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn value(&self, name: &str) -> Result<&Value, RecordError> {
        self.get(name)
            .ok_or_else(|| RecordError::MissingColumn(name.to_string()))
    }

    /// Positional access in projection order.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.columns.get(index).map(|(_, v)| v)
    }

    /// Text with the fixed-width padding removed.
    pub fn strip(&self, name: &str) -> Result<&str, RecordError> {
        self.value(name)?
            .as_str()
            .map(str::trim)
            .ok_or_else(|| RecordError::NotText(name.to_string()))
    }

    /// Reads a number, accepting either a comma or a point as the
    /// fractional separator.
    pub fn float(&self, name: &str) -> Result<f64, RecordError> {
        let value = self.value(name)?;
        value.as_f64().ok_or_else(|| RecordError::NotNumeric {
            column: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn decimal(&self, name: &str) -> Result<BigDecimal, RecordError> {
        let value = self.value(name)?;
        value.as_decimal().ok_or_else(|| RecordError::NotNumeric {
            column: name.to_string(),
            value: value.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
