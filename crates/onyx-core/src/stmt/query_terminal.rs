use super::*;

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct QueryTerminal {
    pub kind: TerminalKind,
    pub source: Box<QueryExpr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    /// Every matching row
    List,

    /// The first matching row, or null
    FirstOrNull,
}

impl QueryExpr {
    pub fn list(self) -> Self {
        self.terminate(TerminalKind::List)
    }

    pub fn first_or_null(self) -> Self {
        self.terminate(TerminalKind::FirstOrNull)
    }

    fn terminate(self, kind: TerminalKind) -> Self {
        QueryTerminal {
            kind,
            source: Box::new(self),
        }
        .into()
    }
}

impl TerminalKind {
    pub fn is_list(self) -> bool {
        matches!(self, Self::List)
    }

    /// Row limit the store should apply for this terminal.
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::List => None,
            Self::FirstOrNull => Some(1),
        }
    }
}

impl From<QueryTerminal> for QueryExpr {
    fn from(value: QueryTerminal) -> Self {
        Self::Terminal(value)
    }
}

impl fmt::Display for QueryTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TerminalKind::List => write!(f, "{}.list()", self.source),
            TerminalKind::FirstOrNull => write!(f, "{}.firstOrNull()", self.source),
        }
    }
}
