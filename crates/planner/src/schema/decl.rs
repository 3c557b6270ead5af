//! Declarations handed to the `RegistryBuilder`.

use crate::schema::field::FieldRef;

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub column: String,
    pub join: Option<FieldRef>,
}

impl FieldDecl {
    pub fn new(name: &str, column: &str) -> Self {
        FieldDecl {
            name: name.to_string(),
            column: column.to_string(),
            join: None,
        }
    }

    /// Points this field at `table.field`, the column it joins against.
    pub fn joins(mut self, table: &str, field: &str) -> Self {
        self.join = Some(FieldRef::new(table, field));
        self
    }
}

/// A column layout shared by several physical tables that differ only by
/// index.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyDecl {
    pub name: String,
    pub prefix: String,
    pub alias: Option<String>,
    pub fields: Vec<FieldDecl>,
}

impl FamilyDecl {
    pub fn new(name: &str, prefix: &str) -> Self {
        FamilyDecl {
            name: name.to_string(),
            prefix: prefix.to_string(),
            alias: None,
            fields: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn field(self, name: &str, column: &str) -> Self {
        self.with(FieldDecl::new(name, column))
    }

    pub fn field_joined(self, name: &str, column: &str, table: &str, target: &str) -> Self {
        self.with(FieldDecl::new(name, column).joins(table, target))
    }

    pub fn with(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

/// A concrete table, either standalone or derived from a family.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDecl {
    pub name: String,
    pub prefix: Option<String>,
    pub family: Option<String>,
    pub index: Option<u32>,
    pub alias: Option<String>,
    pub fields: Vec<FieldDecl>,
}

impl TableDecl {
    pub fn new(name: &str, prefix: &str) -> Self {
        TableDecl {
            name: name.to_string(),
            prefix: Some(prefix.to_string()),
            family: None,
            index: None,
            alias: None,
            fields: Vec::new(),
        }
    }

    /// A table that starts from a copy of `family`'s fields and prefix.
    pub fn derive(name: &str, family: &str) -> Self {
        TableDecl {
            name: name.to_string(),
            prefix: None,
            family: Some(family.to_string()),
            index: None,
            alias: None,
            fields: Vec::new(),
        }
    }

    pub fn index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// Overrides the prefix a derived table would inherit.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn field(self, name: &str, column: &str) -> Self {
        self.with(FieldDecl::new(name, column))
    }

    pub fn field_joined(self, name: &str, column: &str, table: &str, target: &str) -> Self {
        self.with(FieldDecl::new(name, column).joins(table, target))
    }

    pub fn with(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}
