//! Driver seams. A driver takes finished SQL and hands back a cursor over
//! positional rows; everything above this layer is driver-agnostic.

use crate::{error::ExecutionError, source::DataSource};
use async_trait::async_trait;
use model::core::value::Value;
use std::collections::VecDeque;

/// One result row, positionally aligned with the projection.
pub type Row = Vec<Value>;

#[async_trait]
pub trait RowCursor: Send {
    async fn next_row(&mut self) -> Result<Option<Row>, ExecutionError>;

    /// Drains the cursor.
    async fn fetch_all(&mut self) -> Result<Vec<Row>, ExecutionError> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

/// A cursor over rows already in memory.
#[derive(Debug, Default)]
pub struct VecCursor {
    rows: VecDeque<Row>,
}

impl VecCursor {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }
}

#[async_trait]
impl RowCursor for VecCursor {
    async fn next_row(&mut self) -> Result<Option<Row>, ExecutionError> {
        Ok(self.rows.pop_front())
    }
}

/// A driver that binds positional `?` parameters itself (ODBC style).
#[async_trait]
pub trait ParamDriver: Send + Sync {
    async fn connect(source: &DataSource) -> Result<Self, ExecutionError>
    where
        Self: Sized;

    async fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Box<dyn RowCursor>, ExecutionError>;
}

/// A driver that only accepts finished SQL text (OLE DB style).
#[async_trait]
pub trait TextDriver: Send + Sync {
    async fn connect(source: &DataSource) -> Result<Self, ExecutionError>
    where
        Self: Sized;

    async fn execute(&self, sql: &str) -> Result<Box<dyn RowCursor>, ExecutionError>;
}
