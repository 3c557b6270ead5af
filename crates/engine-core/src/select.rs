use crate::{
    error::QueryError,
    mapper::ResultMapper,
    options::ExecOptions,
    session::Session,
    settings::FailurePolicy,
};
use connectors::driver::Row;
use model::{core::value::Value, records::record::Record};
use planner::{
    error::QueryBuildError,
    expr::Predicate,
    query::{
        ast::{
            common::JoinKind,
            select::{Projection, QueryDescription},
        },
        builder::select::SelectBuilder,
        renderer::RenderedQuery,
    },
    schema::{field::FieldSchema, table::TableSchema},
};
use std::collections::HashMap;

/// A query bound to a session. Builder calls forward to [`SelectBuilder`];
/// every terminal call renders and executes afresh, so one handle can be
/// run more than once.
#[derive(Clone)]
pub struct Select<'s> {
    session: &'s Session,
    builder: SelectBuilder,
}

impl<'s> Select<'s> {
    pub fn new(session: &'s Session, table: &TableSchema) -> Self {
        Select {
            session,
            builder: SelectBuilder::new(table),
        }
    }

    pub fn select<I, P>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        self.builder = self.builder.select(items);
        self
    }

    pub fn extend(mut self, field: &FieldSchema) -> Self {
        self.builder = self.builder.extend(field);
        self
    }

    pub fn left_outer(mut self, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.builder = self.builder.left_outer(target, local);
        self
    }

    pub fn right_outer(mut self, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.builder = self.builder.right_outer(target, local);
        self
    }

    pub fn inner(mut self, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.builder = self.builder.inner(target, local);
        self
    }

    pub fn join(mut self, kind: JoinKind, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.builder = self.builder.join(kind, target, local);
        self
    }

    pub fn filter(mut self, predicate: impl Into<Predicate>) -> Self {
        self.builder = self.builder.filter(predicate);
        self
    }

    pub fn build(&self) -> Result<QueryDescription, QueryBuildError> {
        self.builder.clone().build()
    }

    /// The SQL text and parameters this query would send.
    pub fn render(&self) -> Result<RenderedQuery, QueryError> {
        let ast = self.build()?;
        Ok(self.session.render(&ast)?)
    }

    pub async fn all(&self) -> Result<Vec<Record>, QueryError> {
        self.all_with(&ExecOptions::default()).await
    }

    /// One record per returned row, in driver order. Failures follow the
    /// session's failure policy.
    pub async fn all_with(&self, options: &ExecOptions) -> Result<Vec<Record>, QueryError> {
        let policy = self.session.settings().failure_policy;
        let (mapper, _, rows) = self.execute(options, policy).await?;
        rows.into_iter()
            .map(|row| mapper.map(row).map_err(QueryError::from))
            .collect()
    }

    pub async fn one(&self) -> Result<Record, QueryError> {
        self.one_with(&ExecOptions::default()).await
    }

    /// The first returned row. An empty result is [`QueryError::NotFound`];
    /// execution failures are always returned, never degraded, so they
    /// cannot be mistaken for a missing row.
    pub async fn one_with(&self, options: &ExecOptions) -> Result<Record, QueryError> {
        let (mapper, query, rows) = self.execute(options, FailurePolicy::Propagate).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(mapper.map(row)?),
            None => Err(QueryError::NotFound(query.sql)),
        }
    }

    pub async fn dict(&self, key: &FieldSchema) -> Result<HashMap<Value, Record>, QueryError> {
        self.dict_with(key, &ExecOptions::default()).await
    }

    /// Records keyed by the stored value of `key`, which must be projected
    /// as-is (an alias is fine, a transform is not). Later rows replace
    /// earlier ones with the same key.
    pub async fn dict_with(
        &self,
        key: &FieldSchema,
        options: &ExecOptions,
    ) -> Result<HashMap<Value, Record>, QueryError> {
        let position = self
            .builder
            .columns()
            .iter()
            .position(|c| c.same_column(key) && c.transform().is_none())
            .ok_or_else(|| QueryBuildError::KeyNotProjected(key.display_name()))?;

        let policy = self.session.settings().failure_policy;
        let (mapper, _, rows) = self.execute(options, policy).await?;

        let mut out = HashMap::with_capacity(rows.len());
        for row in rows {
            let raw = row[position].clone();
            out.insert(raw, mapper.map(row)?);
        }
        Ok(out)
    }

    async fn execute(
        &self,
        options: &ExecOptions,
        policy: FailurePolicy,
    ) -> Result<(ResultMapper, RenderedQuery, Vec<Row>), QueryError> {
        let ast = self.build()?;
        let query = self.session.render(&ast)?;
        let mapper = ResultMapper::new(&ast.columns);
        let rows = self.session.fetch(&query, &mapper, options, policy).await?;
        Ok((mapper, query, rows))
    }
}
