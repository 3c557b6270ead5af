//! Filter conditions built from fields.
//!
//! Comparisons are explicit methods on `FieldSchema` (`equals`,
//! `less_than`, ...) that return a `Condition`; the right-hand side is kept
//! as given and only checked when the query is rendered.

use crate::schema::field::FieldSchema;
use model::core::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
}

impl CompareOp {
    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
            CompareOp::In => "IN",
        }
    }
}

/// The right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A literal, bound as a parameter. `Value::Null` selects `IS [NOT] NULL`.
    Value(Value),
    /// Another column, bound by its qualified name.
    Field(FieldSchema),
    /// The members of an `IN` test.
    List(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: CompareOp,
    pub left: FieldSchema,
    pub right: Operand,
}

impl Condition {
    pub fn new(op: CompareOp, left: FieldSchema, right: Operand) -> Self {
        Condition { op, left, right }
    }
}

/// Conditions joined with `OR`, rendered as one parenthesized group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Disjunction {
    pub conditions: Vec<Condition>,
}

impl Disjunction {
    pub fn or(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

/// Anything that can go into a `WHERE` chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Condition(Condition),
    Any(Disjunction),
}

impl From<Condition> for Predicate {
    fn from(condition: Condition) -> Self {
        Predicate::Condition(condition)
    }
}

impl From<Disjunction> for Predicate {
    fn from(group: Disjunction) -> Self {
        Predicate::Any(group)
    }
}

/// Groups conditions so that any one of them may hold.
pub fn any_of<I>(conditions: I) -> Disjunction
where
    I: IntoIterator<Item = Condition>,
{
    Disjunction {
        conditions: conditions.into_iter().collect(),
    }
}

impl FieldSchema {
    fn compare(&self, op: CompareOp, value: Value) -> Condition {
        Condition::new(op, self.clone(), Operand::Value(value))
    }

    pub fn equals(&self, value: impl Into<Value>) -> Condition {
        self.compare(CompareOp::Eq, value.into())
    }

    pub fn not_equals(&self, value: impl Into<Value>) -> Condition {
        self.compare(CompareOp::NotEq, value.into())
    }

    pub fn less_than(&self, value: impl Into<Value>) -> Condition {
        self.compare(CompareOp::Lt, value.into())
    }

    pub fn less_or_equal(&self, value: impl Into<Value>) -> Condition {
        self.compare(CompareOp::LtEq, value.into())
    }

    pub fn greater_than(&self, value: impl Into<Value>) -> Condition {
        self.compare(CompareOp::Gt, value.into())
    }

    pub fn greater_or_equal(&self, value: impl Into<Value>) -> Condition {
        self.compare(CompareOp::GtEq, value.into())
    }

    pub fn is_null(&self) -> Condition {
        self.compare(CompareOp::Eq, Value::Null)
    }

    pub fn is_not_null(&self) -> Condition {
        self.compare(CompareOp::NotEq, Value::Null)
    }

    /// Compares against another column. The other column's qualified name is
    /// bound as the parameter.
    pub fn compare_field(&self, op: CompareOp, other: &FieldSchema) -> Condition {
        Condition::new(op, self.clone(), Operand::Field(other.clone()))
    }

    pub fn equals_field(&self, other: &FieldSchema) -> Condition {
        self.compare_field(CompareOp::Eq, other)
    }

    pub fn is_in<I, V>(&self, values: I) -> Condition
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Condition::new(CompareOp::In, self.clone(), Operand::List(values))
    }
}
