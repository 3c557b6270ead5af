#![allow(dead_code)]

use chrono::NaiveDate;
use model::{core::value::Value, records::record::Record};
use std::collections::HashMap;

/// The date every balance scenario is run for.
pub fn balance_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

/// Builds a row from anything convertible into values of one type.
pub fn row<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Vec<Value> {
    values.into_iter().map(Into::into).collect()
}

pub fn record_names(record: &Record) -> Vec<&str> {
    record.names().collect()
}

pub fn text(record: &Record, name: &str) -> String {
    record.strip(name).unwrap().to_string()
}

/// Flattens a keyed result into key -> one column, for compact asserts.
pub fn column_by_key(
    records: &HashMap<Value, Record>,
    column: &str,
) -> HashMap<Value, Value> {
    records
        .iter()
        .map(|(key, record)| (key.clone(), record.value(column).unwrap().clone()))
        .collect()
}
