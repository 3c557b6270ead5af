use crate::{
    error::SchemaError,
    schema::{
        decl::{FamilyDecl, FieldDecl, TableDecl},
        field::{FieldRef, FieldSchema},
        table::{TableMeta, TableSchema},
    },
};
use std::{collections::HashMap, sync::Arc};

/// Collects declarations until `freeze` turns them into a `SchemaRegistry`.
///
/// Join targets are only resolved on `freeze`, so a table may point at a
/// table declared after it.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    families: Vec<FamilyDecl>,
    tables: Vec<TableDecl>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(&mut self, decl: FamilyDecl) -> Result<&mut Self, SchemaError> {
        if decl.prefix.trim().is_empty() {
            return Err(SchemaError::MissingPrefix(decl.name));
        }
        if self.families.iter().any(|f| f.name == decl.name) {
            return Err(SchemaError::DuplicateName(decl.name));
        }
        check_unique_fields(&decl.name, &decl.fields)?;

        self.families.push(decl);
        Ok(self)
    }

    pub fn table(&mut self, decl: TableDecl) -> Result<&mut Self, SchemaError> {
        let has_prefix = match &decl.prefix {
            Some(prefix) => !prefix.trim().is_empty(),
            None => decl.family.is_some(),
        };
        if !has_prefix {
            return Err(SchemaError::MissingPrefix(decl.name));
        }
        if self.tables.iter().any(|t| t.name == decl.name) {
            return Err(SchemaError::DuplicateName(decl.name));
        }
        check_unique_fields(&decl.name, &decl.fields)?;

        self.tables.push(decl);
        Ok(self)
    }

    pub fn freeze(self) -> Result<SchemaRegistry, SchemaError> {
        // Pass 1: give every table its own copy of the family layout.
        let mut staged: Vec<(Arc<TableMeta>, Vec<FieldDecl>)> = Vec::with_capacity(self.tables.len());
        for decl in &self.tables {
            let family = match &decl.family {
                Some(name) => Some(self.families.iter().find(|f| &f.name == name).ok_or_else(
                    || SchemaError::UnknownFamily {
                        table: decl.name.clone(),
                        family: name.clone(),
                    },
                )?),
                None => None,
            };

            let prefix = decl
                .prefix
                .as_deref()
                .or(family.map(|f| f.prefix.as_str()))
                .ok_or_else(|| SchemaError::MissingPrefix(decl.name.clone()))?;
            let alias = decl
                .alias
                .as_deref()
                .or(family.and_then(|f| f.alias.as_deref()));

            let mut layout = family.map(|f| f.fields.clone()).unwrap_or_default();
            for field in &decl.fields {
                match layout.iter_mut().find(|f| f.name == field.name) {
                    Some(slot) => *slot = field.clone(),
                    None => layout.push(field.clone()),
                }
            }

            let meta = TableMeta::new(&decl.name, prefix, decl.index, alias);
            staged.push((Arc::new(meta), layout));
        }

        // Pass 2: bind owners and resolve join targets.
        let by_name: HashMap<String, usize> = staged
            .iter()
            .enumerate()
            .map(|(i, (meta, _))| (meta.name().to_string(), i))
            .collect();

        let mut tables = Vec::with_capacity(staged.len());
        for (meta, layout) in &staged {
            let mut fields = Vec::with_capacity(layout.len());
            for decl in layout {
                let field = FieldSchema::new(Arc::clone(meta), &decl.name, &decl.column);
                let field = match &decl.join {
                    Some(target) => {
                        let resolved = resolve(&staged, &by_name, target).ok_or_else(|| {
                            SchemaError::UnresolvedJoin {
                                table: meta.name().to_string(),
                                field: decl.name.clone(),
                                target: target.to_string(),
                            }
                        })?;
                        field.with_join(resolved)
                    }
                    None => field,
                };
                fields.push(field);
            }
            tables.push(TableSchema::new(Arc::clone(meta), fields));
        }

        Ok(SchemaRegistry { tables, by_name })
    }
}

fn check_unique_fields(table: &str, fields: &[FieldDecl]) -> Result<(), SchemaError> {
    for (i, field) in fields.iter().enumerate() {
        if fields[..i].iter().any(|f| f.name == field.name) {
            return Err(SchemaError::DuplicateField {
                table: table.to_string(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

fn resolve(
    staged: &[(Arc<TableMeta>, Vec<FieldDecl>)],
    by_name: &HashMap<String, usize>,
    target: &FieldRef,
) -> Option<FieldSchema> {
    let (meta, layout) = &staged[*by_name.get(&target.table)?];
    let decl = layout.iter().find(|f| f.name == target.field)?;
    Some(FieldSchema::new(Arc::clone(meta), &decl.name, &decl.column))
}

/// The frozen catalog of tables. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: Vec<TableSchema>,
    by_name: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn table(&self, name: &str) -> Result<&TableSchema, SchemaError> {
        self.by_name
            .get(name)
            .map(|&i| &self.tables[i])
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    pub fn field(&self, table: &str, field: &str) -> Result<&FieldSchema, SchemaError> {
        self.table(table)?.field(field)
    }

    /// All tables in declaration order.
    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
