mod filter;
pub use filter::{Condition, Filter};

mod predicate;
pub use predicate::Predicate;

mod predicate_and;
pub use predicate_and::PredicateAnd;

mod predicate_eq;
pub use predicate_eq::PredicateEq;

mod predicate_in;
pub use predicate_in::PredicateIn;

mod query;
pub use query::QueryExpr;

mod query_from;
pub use query_from::QueryFrom;

mod query_project;
pub use query_project::QueryProject;

mod query_terminal;
pub use query_terminal::{QueryTerminal, TerminalKind};

mod query_where;
pub use query_where::QueryWhere;

mod ty;
pub use ty::Type;

mod value;
pub use value::Value;

mod value_ref;
pub use value_ref::ValueRef;
