mod context;
use context::{Frame, ResolutionContext};

mod exec;

use crate::compile::Resolvers;

use onyx_core::{
    driver::{Operation, Response},
    Driver, Result, Schema,
};
use std::{sync::Arc, time::Duration};

/// Everything a [`Db`](crate::Db) handle shares with its clones.
#[derive(Debug)]
pub(crate) struct Engine {
    pub(crate) schema: Arc<Schema>,

    /// Compiled resolvers, one per `(entity, resolver)` pair
    pub(crate) resolvers: Resolvers,

    pub(crate) driver: Box<dyn Driver>,

    /// Deadline applied to resolutions that do not set their own
    pub(crate) resolve_timeout: Option<Duration>,
}

impl Engine {
    /// Sends one operation to the store.
    pub(crate) async fn exec(&self, op: Operation) -> Result<Response> {
        tracing::trace!(?op, "driver exec");
        self.driver.exec(&self.schema, op).await
    }
}
