use crate::schema::table::TableMeta;
use std::{fmt, sync::Arc};

/// A SQL function wrapped around a column when it is projected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Transform {
    /// `RIGHT(<column>, n)`
    Right(usize),
    /// `LEFT(<column>, n)`
    Left(usize),
    /// Free-form template; every `{}` is replaced by the column.
    Template(String),
}

impl Transform {
    pub fn apply(&self, column: &str) -> String {
        match self {
            Transform::Right(n) => format!("RIGHT({column}, {n})"),
            Transform::Left(n) => format!("LEFT({column}, {n})"),
            Transform::Template(template) => template.replace("{}", column),
        }
    }
}

/// A symbolic pointer to `table.field`, resolved when the registry freezes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub table: String,
    pub field: String,
}

impl FieldRef {
    pub fn new(table: &str, field: &str) -> Self {
        FieldRef {
            table: table.to_string(),
            field: field.to_string(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.field)
    }
}

/// A column of a registered table.
///
/// Values are immutable: `alias`, `right` and friends return a modified
/// copy, so a field taken from the registry can be reused freely.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    owner: Arc<TableMeta>,
    name: String,
    column: String,
    // Shallow: the target's own join target is not carried.
    join: Option<Box<FieldSchema>>,
    alias: Option<String>,
    transform: Option<Transform>,
}

impl FieldSchema {
    pub(crate) fn new(owner: Arc<TableMeta>, name: &str, column: &str) -> Self {
        FieldSchema {
            owner,
            name: name.to_string(),
            column: column.to_string(),
            join: None,
            alias: None,
            transform: None,
        }
    }

    pub(crate) fn with_join(mut self, target: FieldSchema) -> Self {
        self.join = Some(Box::new(target));
        self
    }

    pub fn owner(&self) -> &TableMeta {
        &self.owner
    }

    /// The logical field name, e.g. `description`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column name in the table file, e.g. `DESCR`.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn join_target(&self) -> Option<&FieldSchema> {
        self.join.as_deref()
    }

    pub fn display_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// `<qualifier>.<column>`, without any transform.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner.qualifier(), self.column)
    }

    /// The projection expression: the qualified name wrapped by the transform.
    pub fn sql_expr(&self) -> String {
        let qualified = self.qualified_name();
        match &self.transform {
            Some(transform) => transform.apply(&qualified),
            None => qualified,
        }
    }

    /// The key this field gets in a result record.
    pub fn display_name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => format!("{}.{}", self.owner.name(), self.name),
        }
    }

    /// Whether both values refer to the same stored column, ignoring
    /// aliases and transforms.
    pub fn same_column(&self, other: &FieldSchema) -> bool {
        self.name == other.name && *self.owner == *other.owner
    }

    pub fn alias(&self, title: impl Into<String>) -> FieldSchema {
        FieldSchema {
            alias: Some(title.into()),
            ..self.clone()
        }
    }

    pub fn right(&self, length: usize) -> FieldSchema {
        self.with_transform(Transform::Right(length))
    }

    pub fn left(&self, length: usize) -> FieldSchema {
        self.with_transform(Transform::Left(length))
    }

    pub fn with_transform(&self, transform: Transform) -> FieldSchema {
        FieldSchema {
            transform: Some(transform),
            ..self.clone()
        }
    }
}
