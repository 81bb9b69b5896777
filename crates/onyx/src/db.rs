mod builder;
pub use builder::Builder;

use crate::{engine::Engine, record, Record, ResolveOptions, Resolved};

use onyx_core::{
    driver::{
        operation::{Delete, FindById, Query, Save},
        Row,
    },
    err,
    schema::Generator,
    stmt::{Filter, QueryExpr, Value},
    Result, Schema,
};
use std::sync::Arc;
use tokio::time::Instant;

/// A handle to a store described by a schema.
///
/// Cloning is cheap; clones share the schema, the compiled resolvers and the
/// driver.
#[derive(Debug, Clone)]
pub struct Db {
    engine: Arc<Engine>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.engine.schema
    }

    /// The compiled pipeline of `entity.resolver`.
    pub fn resolver(&self, entity: &str, resolver: &str) -> Result<&QueryExpr> {
        self.engine
            .resolvers
            .get(entity, resolver)
            .map(|expr| expr.as_ref())
    }

    pub async fn find_by_id(&self, entity: &str, id: impl Into<Value>) -> Result<Option<Record>> {
        let schema_entity = self.schema().expect_entity(entity)?;

        let rows = self
            .engine
            .exec(
                FindById {
                    entity: entity.to_string(),
                    id: id.into(),
                }
                .into(),
            )
            .await?
            .rows
            .into_values()?;

        rows.into_iter()
            .next()
            .map(|row| Record::materialize(schema_entity, row))
            .transpose()
    }

    /// Every record of `entity` matching `filter`.
    pub async fn query(&self, entity: &str, filter: Filter) -> Result<Vec<Record>> {
        self.select(entity, filter, None).await
    }

    /// The first record of `entity` matching `filter`.
    pub async fn first(&self, entity: &str, filter: Filter) -> Result<Option<Record>> {
        Ok(self.select(entity, filter, Some(1)).await?.into_iter().next())
    }

    /// Inserts or replaces a record, keyed by its identifier.
    ///
    /// A missing identifier is generated when the entity's generator is
    /// `UUID` and left to the store for `Sequence`. With no generator the
    /// caller must supply it.
    pub async fn save(&self, entity: &str, mut row: Row) -> Result<Record> {
        let schema_entity = self.schema().expect_entity(entity)?;
        let identifier = &schema_entity.identifier;

        if row.value(&identifier.name).is_null() {
            match identifier.generator {
                Generator::Uuid => {
                    row.insert(identifier.name.clone(), uuid::Uuid::new_v4().to_string());
                }
                Generator::Sequence => {}
                Generator::None => {
                    return Err(err!(
                        "cannot save `{entity}` without a value for identifier `{}`",
                        identifier.name
                    ))
                }
            }
        }

        let row = record::normalize(schema_entity, row)?;

        let rows = self
            .engine
            .exec(
                Save {
                    entity: entity.to_string(),
                    row,
                }
                .into(),
            )
            .await?
            .rows
            .into_values()?;

        let Some(row) = rows.into_iter().next() else {
            return Err(err!("store returned no row after saving `{entity}`"));
        };

        Record::materialize(schema_entity, row)
    }

    /// Deletes a record by identifier, returning whether it existed.
    pub async fn delete(&self, entity: &str, id: impl Into<Value>) -> Result<bool> {
        self.schema().expect_entity(entity)?;

        let count = self
            .engine
            .exec(
                Delete {
                    entity: entity.to_string(),
                    id: id.into(),
                }
                .into(),
            )
            .await?
            .rows
            .into_count()?;

        Ok(count > 0)
    }

    /// Resolves `resolver` on `record`.
    ///
    /// The first successful resolution is memoized on the record; later
    /// calls return the same value without touching the store.
    pub async fn resolve(&self, record: &Record, resolver: &str) -> Result<Resolved> {
        self.resolve_with(record, resolver, &ResolveOptions::default())
            .await
    }

    /// Like [`Db::resolve`], bounded by a deadline or cancel token.
    ///
    /// Without an explicit deadline the configured resolve timeout applies.
    pub async fn resolve_with(
        &self,
        record: &Record,
        resolver: &str,
        options: &ResolveOptions,
    ) -> Result<Resolved> {
        match (options.deadline, self.engine.resolve_timeout) {
            (None, Some(timeout)) => {
                let options = options.clone().deadline(Instant::now() + timeout);
                self.engine.resolve(record, resolver, &options).await
            }
            _ => self.engine.resolve(record, resolver, options).await,
        }
    }

    async fn select(
        &self,
        entity: &str,
        filter: Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Record>> {
        let schema_entity = self.schema().expect_entity(entity)?;

        let rows = self
            .engine
            .exec(
                Query {
                    entity: entity.to_string(),
                    filter,
                    limit,
                }
                .into(),
            )
            .await?
            .rows
            .into_values()?;

        rows.into_iter()
            .map(|row| Record::materialize(schema_entity, row))
            .collect()
    }
}
