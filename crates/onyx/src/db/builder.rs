use super::Db;
use crate::{compile::Resolvers, engine::Engine, Config};

use onyx_core::{Driver, Result, Schema};
use std::{path::PathBuf, sync::Arc, time::Duration};

#[derive(Debug, Default)]
pub struct Builder {
    schema: Option<SchemaSource>,

    config: Option<Config>,

    /// Overrides the configured strictness
    strict_resolvers: Option<bool>,

    /// Overrides the configured resolve timeout
    resolve_timeout: Option<Duration>,
}

#[derive(Debug)]
enum SchemaSource {
    Schema(Schema),
    Json(String),
    Path(PathBuf),
}

impl Builder {
    pub fn schema(&mut self, schema: Schema) -> &mut Self {
        self.schema = Some(SchemaSource::Schema(schema));
        self
    }

    /// Reads the schema from a JSON document.
    pub fn schema_json(&mut self, src: impl Into<String>) -> &mut Self {
        self.schema = Some(SchemaSource::Json(src.into()));
        self
    }

    /// Reads the schema from a JSON file.
    pub fn schema_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.schema = Some(SchemaSource::Path(path.into()));
        self
    }

    /// Uses `config` for everything not set on the builder directly. When no
    /// schema is given, it is read from the configured schema path.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = Some(config);
        self
    }

    /// When `true` (the default), `build` fails if any resolver does not
    /// compile. Otherwise the failure is logged and reported each time the
    /// resolver is used; the other resolvers stay usable.
    pub fn strict_resolvers(&mut self, strict: bool) -> &mut Self {
        self.strict_resolvers = Some(strict);
        self
    }

    /// Default deadline for resolutions that do not set their own.
    pub fn resolve_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.resolve_timeout = Some(timeout);
        self
    }

    pub async fn build(&mut self, mut driver: impl Driver) -> Result<Db> {
        let config = self.config.clone().unwrap_or_default();

        let schema = match self.schema.take() {
            Some(SchemaSource::Schema(schema)) => schema,
            Some(SchemaSource::Json(src)) => Schema::from_json(&src)?,
            Some(SchemaSource::Path(path)) => Schema::from_path(path)?,
            None => Schema::from_path(&config.schema_path.value)?,
        };

        let strict = self
            .strict_resolvers
            .unwrap_or(config.strict_resolvers.value);

        let resolve_timeout = self
            .resolve_timeout
            .or(config.resolve_timeout.map(|setting| setting.value));

        let resolvers = Resolvers::compile(&schema);

        if strict {
            if let Some(err) = resolvers.errors().next() {
                return Err(err.clone());
            }
        }

        driver.register_schema(&schema).await?;

        tracing::info!(
            database_id = schema.database_id.as_deref().unwrap_or_default(),
            entities = schema.entities().len(),
            resolvers = resolvers.len(),
            malformed = resolvers.errors().count(),
            "built db"
        );

        Ok(Db {
            engine: Arc::new(Engine {
                schema: Arc::new(schema),
                resolvers,
                driver: Box::new(driver),
                resolve_timeout,
            }),
        })
    }
}
