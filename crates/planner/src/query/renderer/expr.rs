use crate::{
    error::QueryBuildError,
    expr::{CompareOp, Condition, Disjunction, Operand, Predicate},
    query::renderer::{InListStyle, Render, Renderer},
};
use model::core::value::Value;

impl Render for Predicate {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryBuildError> {
        match self {
            Predicate::Condition(cond) => cond.render(r),
            Predicate::Any(group) => group.render(r),
        }
    }
}

impl Render for Condition {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryBuildError> {
        let left = self.left.sql_expr();
        let op = self.op.as_sql();

        match (self.op, &self.right) {
            (CompareOp::Eq, Operand::Value(Value::Null)) => {
                r.sql.push_str(&format!("{left} IS NULL"));
            }
            (CompareOp::NotEq, Operand::Value(Value::Null)) => {
                r.sql.push_str(&format!("{left} IS NOT NULL"));
            }
            (_, Operand::Value(Value::Null)) => {
                return Err(QueryBuildError::InvalidNullComparison {
                    field: self.left.display_name(),
                    op: op.to_string(),
                });
            }
            (CompareOp::In, Operand::List(values)) => {
                if values.is_empty() {
                    return Err(QueryBuildError::EmptyInList(self.left.display_name()));
                }
                let style = r.in_lists;
                r.sql.push_str(&format!("{left} IN ("));
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        r.sql.push(',');
                    }
                    match style {
                        InListStyle::Bound => r.add_param(value.clone()),
                        InListStyle::Inline => {
                            let literal = r.dialect.render_literal(value)?;
                            r.sql.push_str(&literal);
                        }
                    }
                }
                r.sql.push(')');
            }
            (CompareOp::In, _) | (_, Operand::List(_)) => {
                return Err(QueryBuildError::OperandMismatch {
                    field: self.left.display_name(),
                    op: op.to_string(),
                });
            }
            (_, Operand::Field(other)) => {
                r.sql.push_str(&format!("{left} {op} "));
                r.add_param(Value::String(other.qualified_name()));
            }
            (_, Operand::Value(value)) => {
                r.sql.push_str(&format!("{left} {op} "));
                r.add_param(value.clone());
            }
        }
        Ok(())
    }
}

impl Render for Disjunction {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryBuildError> {
        if self.conditions.is_empty() {
            return Err(QueryBuildError::EmptyDisjunction);
        }

        r.sql.push('(');
        for (i, cond) in self.conditions.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(" OR ");
            }
            cond.render(r)?;
        }
        r.sql.push(')');
        Ok(())
    }
}
