use crate::{
    error::QueryBuildError,
    query::{
        ast::select::{JoinClause, QueryDescription},
        renderer::{Render, Renderer},
    },
    schema::table::TableMeta,
};

impl Render for QueryDescription {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryBuildError> {
        if self.columns.is_empty() {
            return Err(QueryBuildError::EmptyProjection);
        }

        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        let columns: Vec<String> = self.columns.iter().map(|c| c.sql_expr()).collect();
        r.sql.push_str(&columns.join(","));

        // 2. FROM with the join tree folded left to right
        r.sql.push_str(" FROM ");
        let from = self
            .joins
            .iter()
            .fold(table_ref(&self.table), fold_join);
        r.sql.push_str(&from);

        // 3. WHERE
        if !self.filters.is_empty() {
            r.sql.push_str(" WHERE ");
            for (i, filter) in self.filters.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(" AND ");
                }
                filter.render(r)?;
            }
        }

        Ok(())
    }
}

fn table_ref(table: &TableMeta) -> String {
    match table.alias() {
        Some(alias) => format!("{} AS {alias}", table.physical_name()),
        None => table.physical_name().to_string(),
    }
}

fn fold_join(tree: String, join: &JoinClause) -> String {
    format!(
        "({tree} {} JOIN {} ON {} = {})",
        join.kind.as_sql(),
        table_ref(join.target.owner()),
        join.target.qualified_name(),
        join.local.qualified_name()
    )
}
