//! Defines the `Dialect` trait for driver-specific SQL syntax.

use crate::error::QueryBuildError;
use chrono::{NaiveDate, NaiveDateTime};
use model::core::value::Value;
use serde::{Deserialize, Serialize};

pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect (e.g., "dBASE ODBC").
    fn name(&self) -> &'static str;

    /// Returns the placeholder for a parameterized query. Both supported
    /// drivers use a positional `?`.
    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    /// Whether the driver binds parameters itself. When it does not, the
    /// engine writes each parameter into the SQL text as a literal.
    fn supports_binding(&self) -> bool;

    fn date_literal(&self, date: NaiveDate) -> String;

    fn timestamp_literal(&self, ts: NaiveDateTime) -> String;

    /// Renders a value as SQL literal text: numbers bare, dates in the
    /// driver's date syntax, everything else single-quoted. NaN and the
    /// infinities have no literal form.
    fn render_literal(&self, value: &Value) -> Result<String, QueryBuildError> {
        let literal = match value {
            Value::Int(v) => v.to_string(),
            Value::Float(v) if !v.is_finite() => {
                return Err(QueryBuildError::NonFiniteLiteral(v.to_string()));
            }
            Value::Float(v) => v.to_string(),
            Value::Decimal(v) => v.to_string(),
            Value::Date(v) => self.date_literal(*v),
            Value::Timestamp(v) => self.timestamp_literal(*v),
            Value::Null => "NULL".into(),
            Value::String(v) => quote(v),
            Value::Boolean(v) => quote(&v.to_string()),
            Value::Bytes(v) => quote(&String::from_utf8_lossy(v)),
        };
        Ok(literal)
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// The Microsoft dBASE ODBC driver: positional binding, ODBC escape dates.
#[derive(Debug, Clone, Default)]
pub struct DbaseOdbc;

impl Dialect for DbaseOdbc {
    fn name(&self) -> &'static str {
        "dBASE ODBC"
    }

    fn supports_binding(&self) -> bool {
        true
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("{{d '{}'}}", date.format("%Y-%m-%d"))
    }

    fn timestamp_literal(&self, ts: NaiveDateTime) -> String {
        format!("{{ts '{}'}}", ts.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// The Visual FoxPro OLE DB provider: no binding, strict `{^...}` dates.
#[derive(Debug, Clone, Default)]
pub struct FoxProOleDb;

impl Dialect for FoxProOleDb {
    fn name(&self) -> &'static str {
        "FoxPro OLE DB"
    }

    fn supports_binding(&self) -> bool {
        false
    }

    fn date_literal(&self, date: NaiveDate) -> String {
        format!("{{^{}}}", date.format("%Y-%m-%d"))
    }

    fn timestamp_literal(&self, ts: NaiveDateTime) -> String {
        format!("{{^{}}}", ts.format("%Y-%m-%d %H:%M:%S"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DialectKind {
    #[default]
    DbaseOdbc,
    FoxproOledb,
}

impl DialectKind {
    pub fn dialect(&self) -> Box<dyn Dialect> {
        match self {
            DialectKind::DbaseOdbc => Box::new(DbaseOdbc),
            DialectKind::FoxproOledb => Box::new(FoxProOleDb),
        }
    }
}
