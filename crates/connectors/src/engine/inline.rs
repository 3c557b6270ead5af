use crate::{
    driver::{RowCursor, TextDriver},
    encoding::{Passthrough, TextCodec},
    engine::{DecodingCursor, QueryEngine},
    error::ExecutionError,
};
use async_trait::async_trait;
use model::core::value::Value;
use planner::query::dialect::Dialect;
use std::sync::Arc;
use tracing::debug;

/// Writes parameters into the SQL text as literals for drivers that
/// cannot bind.
#[derive(Clone)]
pub struct InlineEngine {
    driver: Arc<dyn TextDriver>,
    dialect: Arc<dyn Dialect>,
    codec: Arc<dyn TextCodec>,
}

impl InlineEngine {
    pub fn new(driver: Arc<dyn TextDriver>, dialect: Arc<dyn Dialect>) -> Self {
        Self {
            driver,
            dialect,
            codec: Arc::new(Passthrough),
        }
    }

    pub fn with_codec(mut self, codec: Arc<dyn TextCodec>) -> Self {
        self.codec = codec;
        self
    }
}

#[async_trait]
impl QueryEngine for InlineEngine {
    fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    async fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Box<dyn RowCursor>, ExecutionError> {
        let text = substitute_params(sql, params, self.dialect.as_ref())?;
        let text = self.codec.encode(&text)?;

        debug!(dialect = self.dialect.name(), "Executing: {text}");
        let cursor = self.driver.execute(&text).await?;
        Ok(Box::new(DecodingCursor::new(cursor, self.codec.clone())))
    }
}

/// Replaces each `?` outside single-quoted literals with the next
/// parameter rendered as a literal. The placeholder count must equal the
/// parameter count; nothing is substituted otherwise.
pub fn substitute_params(
    sql: &str,
    params: &[Value],
    dialect: &dyn Dialect,
) -> Result<String, ExecutionError> {
    let placeholders = placeholder_positions(sql);
    if placeholders.len() != params.len() {
        return Err(ExecutionError::ParameterCount {
            placeholders: placeholders.len(),
            params: params.len(),
        });
    }

    let mut out = String::with_capacity(sql.len() + params.len() * 8);
    let mut last = 0;
    for (pos, value) in placeholders.into_iter().zip(params) {
        out.push_str(&sql[last..pos]);
        let literal = dialect
            .render_literal(value)
            .map_err(|e| ExecutionError::Literal(e.to_string()))?;
        out.push_str(&literal);
        last = pos + 1;
    }
    out.push_str(&sql[last..]);
    Ok(out)
}

fn placeholder_positions(sql: &str) -> Vec<usize> {
    let mut in_quote = false;
    sql.char_indices()
        .filter_map(|(i, c)| match c {
            // a doubled '' inside a literal toggles twice and stays quoted
            '\'' => {
                in_quote = !in_quote;
                None
            }
            '?' if !in_quote => Some(i),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{driver::VecCursor, source::DataSource};
    use chrono::NaiveDate;
    use planner::query::dialect::{DbaseOdbc, FoxProOleDb};
    use std::sync::Mutex;

    #[test]
    fn test_substitutes_in_order() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let sql = substitute_params(
            "SELECT A FROM T WHERE A = ? AND B > ? AND C = ?",
            &[Value::from("x"), Value::Int(10), Value::Date(date)],
            &FoxProOleDb,
        )
        .unwrap();
        assert_eq!(
            sql,
            "SELECT A FROM T WHERE A = 'x' AND B > 10 AND C = {^2024-02-29}"
        );
    }

    #[test]
    fn test_question_marks_inside_literals_are_not_placeholders() {
        let sql = substitute_params(
            "SELECT A FROM T WHERE A = 'why?' AND B = 'it''s?' AND C = ?",
            &[Value::from("O'Brien")],
            &DbaseOdbc,
        )
        .unwrap();
        assert_eq!(
            sql,
            "SELECT A FROM T WHERE A = 'why?' AND B = 'it''s?' AND C = 'O''Brien'"
        );
    }

    #[test]
    fn test_null_and_decimal_literals() {
        let sql = substitute_params(
            "UPDATE T SET A = ?, B = ?",
            &[Value::Null, Value::Float(1.5)],
            &FoxProOleDb,
        )
        .unwrap();
        assert_eq!(sql, "UPDATE T SET A = NULL, B = 1.5");
    }

    #[test]
    fn test_count_mismatch() {
        assert_eq!(
            substitute_params("A = ? AND B = ?", &[Value::Int(1)], &FoxProOleDb).unwrap_err(),
            ExecutionError::ParameterCount {
                placeholders: 2,
                params: 1
            }
        );
        assert_eq!(
            substitute_params("A = '?'", &[Value::Int(1)], &FoxProOleDb).unwrap_err(),
            ExecutionError::ParameterCount {
                placeholders: 0,
                params: 1
            }
        );
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        let err = substitute_params("A = ?", &[Value::Float(f64::INFINITY)], &FoxProOleDb)
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Literal(msg) if msg.contains("inf")));
    }

    #[derive(Default)]
    struct TextRecorder {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextDriver for TextRecorder {
        async fn connect(_source: &DataSource) -> Result<Self, ExecutionError> {
            Ok(TextRecorder::default())
        }

        async fn execute(&self, sql: &str) -> Result<Box<dyn RowCursor>, ExecutionError> {
            self.seen.lock().unwrap().push(sql.to_string());
            Ok(Box::new(VecCursor::new(vec![vec![Value::Int(1)]])))
        }
    }

    #[tokio::test]
    async fn test_driver_receives_finished_text() {
        let driver = Arc::new(TextRecorder::default());
        let engine = InlineEngine::new(driver.clone(), Arc::new(FoxProOleDb));

        let rows = engine
            .execute("SELECT ID FROM SC1 WHERE CODE = ?", &[Value::from("A")])
            .await
            .unwrap()
            .fetch_all()
            .await
            .unwrap();
        assert_eq!(rows, vec![vec![Value::Int(1)]]);
        assert_eq!(
            driver.seen.lock().unwrap().as_slice(),
            ["SELECT ID FROM SC1 WHERE CODE = 'A'"]
        );
    }

    #[tokio::test]
    async fn test_mismatch_never_reaches_driver() {
        let driver = Arc::new(TextRecorder::default());
        let engine = InlineEngine::new(driver.clone(), Arc::new(FoxProOleDb));

        let err = engine.execute("SELECT ID FROM SC1", &[Value::Int(1)]).await;
        assert!(matches!(err, Err(ExecutionError::ParameterCount { .. })));
        assert!(driver.seen.lock().unwrap().is_empty());
    }
}
