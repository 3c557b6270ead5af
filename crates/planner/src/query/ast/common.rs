//! Defines common, reusable AST nodes for building SQL queries.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    LeftOuter,
    RightOuter,
    Inner,
}

impl JoinKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinKind::LeftOuter => "LEFT OUTER",
            JoinKind::RightOuter => "RIGHT OUTER",
            JoinKind::Inner => "INNER",
        }
    }
}
