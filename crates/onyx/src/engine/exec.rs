use super::{Engine, Frame, ResolutionContext};
use crate::{Record, ResolveOptions, Resolved};

use async_recursion::async_recursion;
use indexmap::IndexMap;
use onyx_core::{
    bail,
    driver::{operation::Query, Row},
    stmt::{Condition, Filter, Predicate, QueryExpr, QueryTerminal, TerminalKind, Value, ValueRef},
    Error, Result,
};
use std::sync::Arc;

/// Evaluation of one top-level resolution.
struct Exec<'a> {
    engine: &'a Engine,
    cx: ResolutionContext,
}

impl Engine {
    /// Resolves `resolver` on `record`, memoizing the result on the record.
    pub(crate) async fn resolve(
        &self,
        record: &Record,
        resolver: &str,
        options: &ResolveOptions,
    ) -> Result<Resolved> {
        if let Some(value) = record.resolved(resolver) {
            tracing::trace!(entity = %record.entity(), id = %record.id(), resolver, "memoized");
            return Ok(value);
        }

        let mut exec = Exec {
            engine: self,
            cx: ResolutionContext::new(options),
        };

        let result = exec.resolve(record, resolver).await;
        debug_assert!(exec.cx.is_empty());
        result
    }
}

impl<'a> Exec<'a> {
    #[async_recursion]
    async fn resolve(&mut self, record: &Record, resolver: &str) -> Result<Resolved> {
        if let Some(value) = record.resolved(resolver) {
            return Ok(value);
        }

        let expr = self.engine.resolvers.get(record.entity(), resolver)?.clone();

        let Some(terminal) = expr.as_terminal() else {
            bail!("resolver `{}.{resolver}` is not terminated", record.entity());
        };

        let frame = Frame {
            entity: record.entity().to_string(),
            id: record.id_string(),
            resolver: resolver.to_string(),
        };

        self.cx.enter(frame.clone())?;
        tracing::debug!(%frame, depth = self.cx.depth(), "resolving");

        let result = self.terminal(record, resolver, terminal).await;
        self.cx.exit(&frame);

        // Only complete values are memoized; a failed resolution leaves the
        // record untouched so the next access retries.
        Ok(record.memoize(resolver, result?))
    }

    async fn terminal(
        &mut self,
        this: &Record,
        resolver: &str,
        terminal: &QueryTerminal,
    ) -> Result<Resolved> {
        let mut records = self
            .select(this, resolver, &terminal.source, terminal.kind.limit())
            .await?
            .into_iter()
            .map(Arc::new);

        Ok(match terminal.kind {
            TerminalKind::List => Resolved::Many(records.collect()),
            TerminalKind::FirstOrNull => records.next().map(Resolved::One).unwrap_or_default(),
        })
    }

    /// Evaluates a `From`/`Where` chain into the records it selects.
    ///
    /// Sub-queries are evaluated first, then exactly one store query is sent
    /// for the chain itself. A chain whose bound filter cannot match any row
    /// skips the store entirely.
    #[async_recursion]
    async fn select(
        &mut self,
        this: &Record,
        resolver: &str,
        source: &QueryExpr,
        limit: Option<usize>,
    ) -> Result<Vec<Record>> {
        let engine = self.engine;
        let entity = engine.schema.expect_entity(source.entity())?;

        let mut filter = Filter::all();
        for predicate in source.predicates() {
            filter.push(self.bind(this, resolver, predicate).await?);
        }

        if filter.is_unsatisfiable() {
            tracing::trace!(entity = %entity.name, %filter, "skipping unsatisfiable query");
            return Ok(vec![]);
        }

        let rows = self
            .query(
                this,
                resolver,
                Query {
                    entity: entity.name.clone(),
                    filter,
                    limit,
                },
            )
            .await?;

        rows.into_iter()
            .map(|row| Record::materialize(entity, row))
            .collect()
    }

    async fn bind(
        &mut self,
        this: &Record,
        resolver: &str,
        predicate: &Predicate,
    ) -> Result<Condition> {
        match predicate {
            Predicate::Eq(eq) => Ok(Condition::Eq {
                field: eq.field.clone(),
                value: self.scalar(this, &eq.value)?,
            }),
            Predicate::In(in_op) => {
                let values = match &in_op.value {
                    ValueRef::Query(query) => self.project(this, resolver, query).await?,
                    value => match self.scalar(this, value)? {
                        Value::List(items) => items,
                        Value::Null => vec![],
                        value => vec![value],
                    },
                };

                Ok(Condition::In {
                    field: in_op.field.clone(),
                    values,
                })
            }
            Predicate::And(_) => bail!("unexpected nested conjunction `{predicate}`"),
        }
    }

    fn scalar(&self, this: &Record, value: &ValueRef) -> Result<Value> {
        match value {
            ValueRef::Literal(value) => Ok(value.clone()),
            ValueRef::This(attr) => this
                .get(attr)
                .cloned()
                .ok_or_else(|| Error::unbound_attribute(this.entity(), attr)),
            ValueRef::Query(query) => bail!("sub-query `{query}` used as a scalar"),
        }
    }

    /// Evaluates a `.list().values(field)` sub-query into the distinct,
    /// non-null values it projects, in first-seen order.
    ///
    /// When `field` names a resolver of the inner entity, the resolver is
    /// evaluated for every inner record and the identifiers of the records
    /// it produced are projected instead.
    async fn project(
        &mut self,
        this: &Record,
        resolver: &str,
        query: &QueryExpr,
    ) -> Result<Vec<Value>> {
        let Some(project) = query.as_project() else {
            bail!("sub-query `{query}` does not project a field");
        };

        let Some(terminal) = project.source.as_terminal() else {
            bail!("projection `{query}` is not terminated");
        };

        let engine = self.engine;
        let inner = engine.schema.expect_entity(terminal.source.entity())?;
        let records = self
            .select(this, resolver, &terminal.source, terminal.kind.limit())
            .await?;

        let mut values = IndexMap::new();
        let mut push = |value: Value| {
            if !value.is_null() {
                values.entry(value.to_json().to_string()).or_insert(value);
            }
        };

        if inner.has_attribute(&project.field) {
            for record in &records {
                push(record.get(&project.field).cloned().unwrap_or_default());
            }
        } else {
            for record in &records {
                for id in self.resolve(record, &project.field).await?.ids() {
                    push(id);
                }
            }
        }

        Ok(values.into_values().collect())
    }

    async fn query(&mut self, this: &Record, resolver: &str, op: Query) -> Result<Vec<Row>> {
        self.cx.checkpoint()?;

        tracing::debug!(
            entity = %op.entity,
            filter = %op.filter,
            limit = ?op.limit,
            "store query"
        );

        let response = match self.cx.deadline() {
            Some(deadline) => tokio::time::timeout_at(deadline, self.engine.exec(op.into()))
                .await
                .map_err(|_| Error::deadline_exceeded())?,
            None => self.engine.exec(op.into()).await,
        };

        response
            .and_then(|response| response.rows.into_values())
            .map_err(|err| {
                err.context(Error::resolver_execution_failed(
                    this.entity(),
                    this.id_string(),
                    resolver,
                ))
            })
    }
}
