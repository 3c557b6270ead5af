//! Defines the core rendering trait and context for converting AST to SQL.

use crate::{error::QueryBuildError, query::dialect::Dialect};
use model::core::value::Value;
use serde::{Deserialize, Serialize};

pub mod expr;
pub mod select;

/// How `IN` lists are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InListStyle {
    /// One placeholder per member: `IN (?,?)`.
    #[default]
    Bound,
    /// Members written as literals: `IN ('A','B')`. Kept for compatibility
    /// with queries that relied on it; values go into the SQL text.
    Inline,
}

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer) -> Result<(), QueryBuildError>;
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the parameters, and provides
/// access to the dialect for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
    pub in_lists: InListStyle,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
            in_lists: InListStyle::default(),
        }
    }

    pub fn with_in_lists(mut self, style: InListStyle) -> Self {
        self.in_lists = style;
        self
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> RenderedQuery {
        RenderedQuery {
            sql: self.sql,
            params: self.params,
        }
    }

    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        let placeholder = self.dialect.get_placeholder(self.params.len() - 1);
        self.sql.push_str(&placeholder);
    }
}

/// SQL text plus its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

impl RenderedQuery {
    /// A stable hash of the text and parameters, used to group repeated
    /// failures of the same query.
    pub fn fingerprint(&self) -> String {
        let serialized = serde_json::to_string(self).unwrap_or_else(|_| self.sql.clone());
        format!("{:x}", md5::compute(serialized))
    }
}

/// Renders any node with a fresh renderer.
pub fn render<T: Render>(
    node: &T,
    dialect: &dyn Dialect,
    in_lists: InListStyle,
) -> Result<RenderedQuery, QueryBuildError> {
    let mut renderer = Renderer::new(dialect).with_in_lists(in_lists);
    node.render(&mut renderer)?;
    Ok(renderer.finish())
}
