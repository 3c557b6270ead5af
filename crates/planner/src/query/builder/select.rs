//! Provides a fluent builder for constructing `QueryDescription` ASTs.

use crate::{
    error::QueryBuildError,
    expr::Predicate,
    query::ast::{
        common::JoinKind,
        select::{JoinClause, Projection, QueryDescription},
    },
    schema::{field::FieldSchema, table::TableSchema},
};

/// Accumulates columns, joins and filters for one query.
///
/// Builder calls never fail; a problem found along the way (e.g. `extend`
/// on a field without a join target) is kept and returned by `build`.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    ast: QueryDescription,
    error: Option<QueryBuildError>,
}

impl SelectBuilder {
    /// Starts a query whose join tree is rooted at `table`.
    pub fn new(table: &TableSchema) -> Self {
        SelectBuilder {
            ast: QueryDescription::new(table),
            error: None,
        }
    }

    /// Appends projected columns. A table expands to all of its fields in
    /// declaration order.
    pub fn select<I, P>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Projection>,
    {
        for item in items {
            match item.into() {
                Projection::Table(table) => self.ast.columns.extend(table.fields().iter().cloned()),
                Projection::Field(field) => self.ast.columns.push(field),
            }
        }
        self
    }

    /// Left outer join through the field's own declared join target.
    pub fn extend(mut self, field: &FieldSchema) -> Self {
        match field.join_target() {
            Some(target) => self.join(JoinKind::LeftOuter, target, field),
            None => {
                self.error
                    .get_or_insert_with(|| QueryBuildError::NoJoinTarget(field.display_name()));
                self
            }
        }
    }

    pub fn left_outer(self, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.join(JoinKind::LeftOuter, target, local)
    }

    pub fn right_outer(self, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.join(JoinKind::RightOuter, target, local)
    }

    pub fn inner(self, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.join(JoinKind::Inner, target, local)
    }

    /// Adds a `JOIN` clause to the query.
    pub fn join(mut self, kind: JoinKind, target: &FieldSchema, local: &FieldSchema) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            target: target.clone(),
            local: local.clone(),
        });
        self
    }

    /// Adds a filter; repeated calls are joined with `AND`.
    pub fn filter(mut self, predicate: impl Into<Predicate>) -> Self {
        self.ast.filters.push(predicate.into());
        self
    }

    pub fn columns(&self) -> &[FieldSchema] {
        &self.ast.columns
    }

    /// Finalizes and returns the constructed `QueryDescription` AST.
    pub fn build(self) -> Result<QueryDescription, QueryBuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.ast.columns.is_empty() {
            return Err(QueryBuildError::EmptyProjection);
        }
        Ok(self.ast)
    }
}
