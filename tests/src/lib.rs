pub use db_test::DbTest;

pub use exec_log::ExecLog;

mod faulty_driver;
pub use faulty_driver::{FaultyDriver, Faults};

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingDriver};

pub mod seed;

/// Path of the schema every scenario runs against.
pub const FIXTURE_SCHEMA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/onyx.schema.json");

/// Installs a `tracing` subscriber honoring `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Identifiers of the records in `resolved`, as strings, sorted.
pub fn ids(resolved: &onyx::Resolved) -> Vec<String> {
    let mut ids: Vec<_> = resolved
        .ids()
        .iter()
        .map(|id| match id.as_str() {
            Some(id) => id.to_string(),
            None => id.to_string(),
        })
        .collect();
    ids.sort();
    ids
}

/// The fixture schema document with `resolver` added to `entity`.
pub fn fixture_with_resolver(entity: &str, name: &str, expression: &str) -> String {
    let src = std::fs::read_to_string(FIXTURE_SCHEMA).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&src).unwrap();

    let table = doc["tables"]
        .as_array_mut()
        .unwrap()
        .iter_mut()
        .find(|table| table["name"] == entity)
        .unwrap_or_else(|| panic!("fixture has no table `{entity}`"));

    table["resolvers"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({ "name": name, "resolver": expression }));

    doc.to_string()
}
