use crate::{
    driver::{ParamDriver, TextDriver},
    encoding::TextCodec,
    engine::{QueryEngine, bound::BoundEngine, inline::InlineEngine},
    error::ExecutionError,
    source::DataSource,
};
use planner::query::dialect::Dialect;
use std::sync::Arc;

/// The execution engine a session talks to, picked by what the driver
/// can do with parameters.
#[derive(Clone)]
pub enum Adapter {
    Bound(BoundEngine),
    Inline(InlineEngine),
}

impl Adapter {
    pub fn bound(driver: Arc<dyn ParamDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Adapter::Bound(BoundEngine::new(driver, dialect))
    }

    pub fn inline(driver: Arc<dyn TextDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Adapter::Inline(InlineEngine::new(driver, dialect))
    }

    pub async fn connect_bound<D>(
        source: &DataSource,
        dialect: Arc<dyn Dialect>,
    ) -> Result<Self, ExecutionError>
    where
        D: ParamDriver + 'static,
    {
        let driver = D::connect(source).await?;
        Ok(Adapter::bound(Arc::new(driver), dialect))
    }

    pub async fn connect_inline<D>(
        source: &DataSource,
        dialect: Arc<dyn Dialect>,
    ) -> Result<Self, ExecutionError>
    where
        D: TextDriver + 'static,
    {
        let driver = D::connect(source).await?;
        Ok(Adapter::inline(Arc::new(driver), dialect))
    }

    pub fn with_codec(self, codec: Arc<dyn TextCodec>) -> Self {
        match self {
            Adapter::Bound(engine) => Adapter::Bound(engine.with_codec(codec)),
            Adapter::Inline(engine) => Adapter::Inline(engine.with_codec(codec)),
        }
    }

    pub fn get_engine(&self) -> &dyn QueryEngine {
        match self {
            Adapter::Bound(engine) => engine,
            Adapter::Inline(engine) => engine,
        }
    }
}
