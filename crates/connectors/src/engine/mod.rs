use crate::{
    driver::{Row, RowCursor},
    encoding::TextCodec,
    error::ExecutionError,
};
use async_trait::async_trait;
use model::core::value::Value;
use planner::query::dialect::Dialect;
use std::sync::Arc;

pub mod bound;
pub mod inline;

/// Executes rendered SQL with its parameters, whatever the driver's
/// binding capabilities are.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    fn dialect(&self) -> &dyn Dialect;

    async fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Box<dyn RowCursor>, ExecutionError>;
}

/// Wraps a driver cursor and decodes string columns on the way out.
pub struct DecodingCursor {
    inner: Box<dyn RowCursor>,
    codec: Arc<dyn TextCodec>,
}

impl DecodingCursor {
    pub fn new(inner: Box<dyn RowCursor>, codec: Arc<dyn TextCodec>) -> Self {
        Self { inner, codec }
    }
}

#[async_trait]
impl RowCursor for DecodingCursor {
    async fn next_row(&mut self) -> Result<Option<Row>, ExecutionError> {
        let Some(row) = self.inner.next_row().await? else {
            return Ok(None);
        };
        let decoded = row
            .into_iter()
            .map(|value| self.codec.decode_value(value))
            .collect::<Result<Row, _>>()?;
        Ok(Some(decoded))
    }
}
