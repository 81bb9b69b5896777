mod response;
pub use response::{Response, Rows};

mod row;
pub use row::Row;

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Schema};

use std::{fmt::Debug, sync::Arc};

/// The store capability the resolver engine and `Db` consume.
///
/// A driver owns persistence, indexing and transport. It never interprets
/// resolvers; it only answers the four operations in [`Operation`].
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Register the schema with the driver.
    ///
    /// Called once, before the first operation.
    async fn register_schema(&mut self, schema: &Schema) -> crate::Result<()>;

    /// Execute a store operation
    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> crate::Result<Response>;
}

#[async_trait]
impl<T: Driver + ?Sized> Driver for Box<T> {
    async fn register_schema(&mut self, schema: &Schema) -> crate::Result<()> {
        (**self).register_schema(schema).await
    }

    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> crate::Result<Response> {
        (**self).exec(schema, op).await
    }
}
