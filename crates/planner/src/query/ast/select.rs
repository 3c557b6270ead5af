//! Defines the Abstract Syntax Tree (AST) for a SELECT query.

use crate::{
    expr::Predicate,
    query::ast::common::JoinKind,
    schema::{
        field::FieldSchema,
        table::{TableMeta, TableSchema},
    },
};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescription {
    /// The table the join tree starts from.
    pub table: Arc<TableMeta>,

    /// The projected fields, in result order.
    pub columns: Vec<FieldSchema>,

    /// Joins, folded onto `table` in this order.
    pub joins: Vec<JoinClause>,

    /// Filters, joined with `AND`.
    pub filters: Vec<Predicate>,
}

impl QueryDescription {
    pub fn new(table: &TableSchema) -> Self {
        QueryDescription {
            table: Arc::clone(table.meta()),
            columns: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub kind: JoinKind,
    /// The field of the joined table, e.g. `Manager.id`.
    pub target: FieldSchema,
    /// The field already in the tree it must equal, e.g. `Clients.manager`.
    pub local: FieldSchema,
}

/// One argument of `select`: a whole table or a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Table(TableSchema),
    Field(FieldSchema),
}

impl From<&TableSchema> for Projection {
    fn from(table: &TableSchema) -> Self {
        Projection::Table(table.clone())
    }
}

impl From<FieldSchema> for Projection {
    fn from(field: FieldSchema) -> Self {
        Projection::Field(field)
    }
}

impl From<&FieldSchema> for Projection {
    fn from(field: &FieldSchema) -> Self {
        Projection::Field(field.clone())
    }
}
