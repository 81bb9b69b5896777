use onyx_core::{
    async_trait,
    driver::{Operation, Response},
    Driver, Result, Schema,
};
use std::sync::{Arc, Mutex};

/// A driver wrapper that logs every operation sent to the store
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

#[derive(Debug, Clone)]
pub struct DriverOp {
    pub operation: Operation,

    /// What the store answered, including failures
    pub response: Result<Response>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.register_schema(schema).await
    }

    async fn exec(&self, schema: &Arc<Schema>, operation: Operation) -> Result<Response> {
        let response = self.inner.exec(schema, operation.clone()).await;

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                operation,
                response: response.clone(),
            });

        response
    }
}
