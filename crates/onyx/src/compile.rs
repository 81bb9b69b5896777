mod lexer;
mod parser;

use indexmap::IndexMap;
use onyx_core::{
    schema::{Entity, ResolverDef},
    stmt::{Predicate, QueryExpr, Value, ValueRef},
    Error, Result, Schema,
};
use std::sync::Arc;

/// Compiles the expression of `resolver`, declared on `entity`, into a
/// query pipeline.
///
/// Any problem with the expression, syntactic or semantic, is reported as a
/// malformed resolver error naming the entity and resolver.
pub fn compile(schema: &Schema, entity: &Entity, resolver: &ResolverDef) -> Result<QueryExpr> {
    let malformed =
        |message: String| Error::malformed_resolver(&entity.name, &resolver.name, message);

    let expr = parser::parse(&resolver.expression).map_err(malformed)?;

    Check {
        schema,
        owner: entity,
    }
    .resolver(&expr)
    .map_err(malformed)?;

    Ok(expr)
}

/// Every resolver of a schema, compiled once.
///
/// Compilation failures are kept alongside successfully compiled resolvers
/// and handed back each time the resolver is requested.
#[derive(Debug, Default)]
pub struct Resolvers {
    entities: IndexMap<String, IndexMap<String, Result<Arc<QueryExpr>>>>,
}

impl Resolvers {
    pub fn compile(schema: &Schema) -> Resolvers {
        let mut entities = IndexMap::new();

        for entity in schema.entities() {
            let mut resolvers = IndexMap::new();

            for resolver in &entity.resolvers {
                let compiled = compile(schema, entity, resolver).map(Arc::new);

                match &compiled {
                    Ok(expr) => tracing::debug!(
                        entity = %entity.name,
                        resolver = %resolver.name,
                        query = %expr,
                        "compiled resolver"
                    ),
                    Err(err) => tracing::warn!(
                        entity = %entity.name,
                        resolver = %resolver.name,
                        error = %err,
                        "failed to compile resolver"
                    ),
                }

                resolvers.insert(resolver.name.clone(), compiled);
            }

            entities.insert(entity.name.clone(), resolvers);
        }

        Resolvers { entities }
    }

    /// Returns the compiled pipeline for `entity.resolver`.
    pub fn get(&self, entity: &str, resolver: &str) -> Result<&Arc<QueryExpr>> {
        let Some(resolvers) = self.entities.get(entity) else {
            return Err(Error::unknown_entity(entity));
        };

        match resolvers.get(resolver) {
            Some(Ok(expr)) => Ok(expr),
            Some(Err(err)) => Err(err.clone()),
            None => Err(Error::unknown_resolver(entity, resolver)),
        }
    }

    /// Compilation errors, in schema order.
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.entities
            .values()
            .flat_map(|resolvers| resolvers.values())
            .filter_map(|compiled| compiled.as_ref().err())
    }

    pub fn len(&self) -> usize {
        self.entities.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type CheckResult<T> = std::result::Result<T, String>;

/// Checks a parsed pipeline against the schema.
struct Check<'a> {
    schema: &'a Schema,

    /// Entity declaring the resolver; `this.<attr>` binds against it
    owner: &'a Entity,
}

impl<'a> Check<'a> {
    fn resolver(&self, expr: &QueryExpr) -> CheckResult<()> {
        match expr {
            QueryExpr::Terminal(terminal) => self.pipeline(&terminal.source).map(|_| ()),
            QueryExpr::Project(_) => Err(
                "a resolver must end with `.list()` or `.firstOrNull()`, not a projection".into(),
            ),
            _ => Err("a resolver must end with `.list()` or `.firstOrNull()`".into()),
        }
    }

    /// Checks a `From`/`Where` chain, returning the entity it reads.
    fn pipeline(&self, expr: &QueryExpr) -> CheckResult<&'a Entity> {
        match expr {
            QueryExpr::From(from) => self
                .schema
                .entity(&from.entity)
                .ok_or_else(|| format!("unknown entity `{}`", from.entity)),
            QueryExpr::Where(query_where) => {
                let entity = self.pipeline(&query_where.source)?;
                self.predicate(entity, &query_where.predicate)?;
                Ok(entity)
            }
            _ => Err(format!("unexpected `{expr}` inside a pipeline")),
        }
    }

    fn predicate(&self, entity: &Entity, predicate: &Predicate) -> CheckResult<()> {
        match predicate {
            Predicate::And(and) => and
                .iter()
                .try_for_each(|operand| self.predicate(entity, operand)),
            Predicate::Eq(eq) => {
                self.field(entity, &eq.field)?;

                match &eq.value {
                    ValueRef::Query(_) => Err(format!(
                        "`eq(\"{}\", ...)` cannot compare against a sub-query; use `inOp`",
                        eq.field
                    )),
                    ValueRef::Literal(Value::List(_)) => Err(format!(
                        "`eq(\"{}\", ...)` cannot compare against a list; use `inOp`",
                        eq.field
                    )),
                    ValueRef::Literal(_) => Ok(()),
                    ValueRef::This(attr) => self.this(attr),
                }
            }
            Predicate::In(in_op) => {
                self.field(entity, &in_op.field)?;

                match &in_op.value {
                    ValueRef::Query(query) => self.projection(query),
                    ValueRef::Literal(Value::List(_)) => Ok(()),
                    ValueRef::Literal(value) => Err(format!(
                        "`inOp(\"{}\", ...)` needs a list, got {value}",
                        in_op.field
                    )),
                    ValueRef::This(attr) => self.this(attr),
                }
            }
        }
    }

    fn projection(&self, expr: &QueryExpr) -> CheckResult<()> {
        let QueryExpr::Project(project) = expr else {
            return Err(format!(
                "sub-query `{expr}` must project a field with `.values(...)`"
            ));
        };

        let Some(terminal) = project.source.as_terminal() else {
            return Err(format!("`.values('{}')` must follow `.list()`", project.field));
        };

        let inner = self.pipeline(&terminal.source)?;

        if inner.has_attribute(&project.field) || inner.has_resolver(&project.field) {
            Ok(())
        } else {
            Err(format!(
                "`{}` is neither an attribute nor a resolver of `{}`",
                project.field, inner.name
            ))
        }
    }

    fn field(&self, entity: &Entity, field: &str) -> CheckResult<()> {
        if entity.has_attribute(field) {
            Ok(())
        } else {
            Err(format!("`{}` has no attribute `{field}`", entity.name))
        }
    }

    fn this(&self, attr: &str) -> CheckResult<()> {
        if self.owner.has_attribute(attr) {
            Ok(())
        } else {
            Err(format!(
                "`this.{attr}` is not an attribute of `{}`",
                self.owner.name
            ))
        }
    }
}
