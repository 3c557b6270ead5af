use crate::{
    driver::{ParamDriver, RowCursor},
    encoding::{Passthrough, TextCodec},
    engine::{DecodingCursor, QueryEngine},
    error::ExecutionError,
};
use async_trait::async_trait;
use model::core::value::Value;
use planner::query::dialect::Dialect;
use std::sync::Arc;
use tracing::debug;

/// Hands SQL and parameters to a driver that binds them itself.
#[derive(Clone)]
pub struct BoundEngine {
    driver: Arc<dyn ParamDriver>,
    dialect: Arc<dyn Dialect>,
    codec: Arc<dyn TextCodec>,
}

impl BoundEngine {
    pub fn new(driver: Arc<dyn ParamDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            driver,
            dialect,
            codec: Arc::new(Passthrough),
        }
    }

    pub fn with_codec(mut self, codec: Arc<dyn TextCodec>) -> Self {
        self.codec = codec;
        self
    }
}

#[async_trait]
impl QueryEngine for BoundEngine {
    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    async fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Box<dyn RowCursor>, ExecutionError> {
        let sql = self.codec.encode(sql)?;
        let params = params
            .iter()
            .map(|p| self.codec.encode_value(p))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(dialect = self.dialect.name(), params = params.len(), "Executing: {sql}");
        let cursor = self.driver.execute(&sql, &params).await?;
        Ok(Box::new(DecodingCursor::new(cursor, self.codec.clone())))
    }
}
