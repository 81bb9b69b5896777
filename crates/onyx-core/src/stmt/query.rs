use super::*;

use std::fmt;

/// A query pipeline.
///
/// Pipelines are built inside-out: `From` is the leaf, `Where` narrows a
/// source, `Terminal` ends a pipeline and decides whether it yields a list or
/// at most one record, and `Project` turns a terminated list into the set of
/// one column's values. A `Project` is only meaningful as the right-hand side
/// of an `In` predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    From(QueryFrom),
    Where(QueryWhere),
    Project(QueryProject),
    Terminal(QueryTerminal),
}

impl QueryExpr {
    /// Name of the entity the pipeline reads from.
    pub fn entity(&self) -> &str {
        match self {
            Self::From(from) => &from.entity,
            Self::Where(filter) => filter.source.entity(),
            Self::Project(project) => project.source.entity(),
            Self::Terminal(terminal) => terminal.source.entity(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    pub fn is_project(&self) -> bool {
        matches!(self, Self::Project(_))
    }

    pub fn as_terminal(&self) -> Option<&QueryTerminal> {
        match self {
            Self::Terminal(terminal) => Some(terminal),
            _ => None,
        }
    }

    pub fn as_project(&self) -> Option<&QueryProject> {
        match self {
            Self::Project(project) => Some(project),
            _ => None,
        }
    }

    /// Collects every predicate applied directly to this pipeline's entity,
    /// flattening chained `where` calls and conjunctions, in source order.
    ///
    /// Predicates of nested sub-queries are not included.
    pub fn predicates(&self) -> Vec<&Predicate> {
        let mut out = vec![];
        self.collect_predicates(&mut out);
        out
    }

    fn collect_predicates<'a>(&'a self, out: &mut Vec<&'a Predicate>) {
        match self {
            Self::From(_) => {}
            Self::Where(filter) => {
                filter.source.collect_predicates(out);
                filter.predicate.flatten_into(out);
            }
            Self::Project(project) => project.source.collect_predicates(out),
            Self::Terminal(terminal) => terminal.source.collect_predicates(out),
        }
    }

    /// Number of store queries evaluating this pipeline issues: one per
    /// terminated pipeline, including every nested sub-query.
    pub fn query_count(&self) -> usize {
        match self {
            Self::From(_) => 0,
            Self::Where(filter) => filter.source.query_count() + filter.predicate.query_count(),
            Self::Project(project) => {
                project.source.query_count() + usize::from(!project.source.is_terminal())
            }
            Self::Terminal(terminal) => 1 + terminal.source.query_count(),
        }
    }
}

impl fmt::Display for QueryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From(from) => fmt::Display::fmt(from, f),
            Self::Where(filter) => fmt::Display::fmt(filter, f),
            Self::Project(project) => fmt::Display::fmt(project, f),
            Self::Terminal(terminal) => fmt::Display::fmt(terminal, f),
        }
    }
}
