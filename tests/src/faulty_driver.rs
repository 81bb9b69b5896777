use onyx_core::{
    async_trait,
    driver::{Operation, Response},
    Driver, Error, Result, Schema,
};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};

/// Wraps a driver and injects store failures and latency on demand.
#[derive(Debug)]
pub struct FaultyDriver {
    inner: Box<dyn Driver>,
    faults: Faults,
}

/// Handle for toggling faults on a [`FaultyDriver`] while a test runs.
#[derive(Debug, Clone, Default)]
pub struct Faults {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    /// Queries on these entities fail with a connection reset
    failing: HashSet<String>,

    /// Sleep before every operation
    latency: Option<Duration>,
}

impl FaultyDriver {
    pub fn new(driver: Box<dyn Driver>, faults: Faults) -> Self {
        Self {
            inner: driver,
            faults,
        }
    }
}

impl Faults {
    /// Make every query on `entity` fail.
    pub fn fail_queries_on(&self, entity: &str) {
        self.state.lock().unwrap().failing.insert(entity.to_string());
    }

    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().unwrap().latency = Some(latency);
    }

    /// Remove every injected fault.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.failing.clear();
        state.latency = None;
    }
}

#[async_trait]
impl Driver for FaultyDriver {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.register_schema(schema).await
    }

    async fn exec(&self, schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        let (fail, latency) = {
            let state = self.faults.state.lock().unwrap();
            (
                op.is_query() && state.failing.contains(op.entity()),
                state.latency,
            )
        };

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if fail {
            return Err(Error::driver_operation_failed(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )));
        }

        self.inner.exec(schema, op).await
    }
}
