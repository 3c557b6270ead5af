use crate::{
    diagnostics::{Diagnostics, FailedQuery},
    error::QueryError,
    mapper::ResultMapper,
    options::ExecOptions,
    select::Select,
    settings::{FailurePolicy, SessionSettings},
};
use connectors::{adapter::Adapter, driver::Row, error::ExecutionError};
use planner::{
    error::QueryBuildError,
    query::{
        ast::select::QueryDescription,
        renderer::{RenderedQuery, render},
    },
    schema::{registry::SchemaRegistry, table::TableSchema},
};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// One engine plus the frozen schema registry. Queries are started here
/// and executed through the session's adapter, one at a time.
#[derive(Clone)]
pub struct Session {
    adapter: Adapter,
    registry: Arc<SchemaRegistry>,
    settings: SessionSettings,
    diagnostics: Diagnostics,
}

impl Session {
    pub fn new(adapter: Adapter, registry: Arc<SchemaRegistry>, settings: SessionSettings) -> Self {
        Session {
            adapter,
            registry,
            settings,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Starts a query rooted at `table`.
    pub fn select(&self, table: &TableSchema) -> Select<'_> {
        Select::new(self, table)
    }

    /// Starts a query rooted at the registered table called `name`.
    pub fn table(&self, name: &str) -> Result<Select<'_>, QueryError> {
        let table = self.registry.table(name)?;
        Ok(Select::new(self, table))
    }

    pub fn render(&self, ast: &QueryDescription) -> Result<RenderedQuery, QueryBuildError> {
        let dialect = self.adapter.get_engine().dialect();
        render(ast, dialect, self.settings.in_lists)
    }

    /// Executes a rendered query and applies `policy` to driver failures.
    /// Cancellation is always returned to the caller.
    pub(crate) async fn fetch(
        &self,
        query: &RenderedQuery,
        mapper: &ResultMapper,
        options: &ExecOptions,
        policy: FailurePolicy,
    ) -> Result<Vec<Row>, ExecutionError> {
        match self.run(query, mapper, options).await {
            Ok(rows) => Ok(rows),
            Err(ExecutionError::Cancelled) => Err(ExecutionError::Cancelled),
            Err(err) if policy == FailurePolicy::DegradeToEmpty => {
                error!(
                    sql = %query.sql,
                    params = ?query.params,
                    "Query failed, returning no rows: {err}"
                );
                self.diagnostics.record(FailedQuery::new(query, &err)).await;
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    async fn run(
        &self,
        query: &RenderedQuery,
        mapper: &ResultMapper,
        options: &ExecOptions,
    ) -> Result<Vec<Row>, ExecutionError> {
        let engine = self.adapter.get_engine();
        debug!(params = query.params.len(), "Running query: {}", query.sql);

        let work = async {
            let mut cursor = engine.execute(&query.sql, &query.params).await?;
            let mut rows = Vec::new();
            while let Some(row) = cursor.next_row().await? {
                mapper.check(&row)?;
                rows.push(row);
            }
            Ok::<_, ExecutionError>(rows)
        };

        let bounded = async {
            match options.timeout.or(self.settings.timeout) {
                Some(limit) => match tokio::time::timeout(limit, work).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(sql = %query.sql, "Query timed out after {limit:?}");
                        Err(ExecutionError::Timeout(limit))
                    }
                },
                None => work.await,
            }
        };

        tokio::select! {
            biased;
            _ = options.cancel.cancelled() => Err(ExecutionError::Cancelled),
            result = bounded => result,
        }
    }
}
