use indexmap::IndexMap;
use onyx_core::{
    driver::{
        operation::{Delete, FindById, Query, Save},
        Operation, Response, Row,
    },
    err,
    schema::Generator,
    stmt::Value,
    Driver, Error, Result, Schema,
};
use std::sync::{Arc, Mutex, MutexGuard};

/// An in-process store keeping every row in memory.
///
/// Rows are kept per entity in insertion order, keyed by their identifier.
/// Queries scan the whole table; there is no indexing.
#[derive(Debug, Default)]
pub struct Memory {
    tables: Mutex<IndexMap<String, Table>>,
}

#[derive(Debug)]
struct Table {
    /// Name of the identifier attribute
    identifier: String,

    generator: Generator,

    /// Last value handed out for `Sequence` identifiers
    sequence: i64,

    rows: IndexMap<String, Row>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored for `entity`.
    pub fn len(&self, entity: &str) -> usize {
        self.lock()
            .map(|tables| tables.get(entity).map(|table| table.rows.len()).unwrap_or(0))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, IndexMap<String, Table>>> {
        self.tables
            .lock()
            .map_err(|_| err!("memory store lock poisoned"))
    }

    fn find_by_id(&self, op: FindById) -> Result<Response> {
        let tables = self.lock()?;
        let table = table(&tables, &op.entity)?;

        let rows = table.rows.get(&key(&op.id)).cloned().into_iter().collect();
        Ok(Response::values(rows))
    }

    fn query(&self, op: Query) -> Result<Response> {
        if op.filter.is_unsatisfiable() {
            return Ok(Response::empty());
        }

        let tables = self.lock()?;
        let table = table(&tables, &op.entity)?;

        let rows = table
            .rows
            .values()
            .filter(|row| op.filter.matches(row))
            .take(op.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Response::values(rows))
    }

    fn save(&self, op: Save) -> Result<Response> {
        let mut tables = self.lock()?;
        let table = tables
            .get_mut(&op.entity)
            .ok_or_else(|| Error::unknown_entity(&op.entity))?;

        let mut row = op.row;

        let id = match row.value(&table.identifier) {
            Value::Null if table.generator == Generator::Sequence => {
                table.sequence += 1;
                row.insert(table.identifier.clone(), table.sequence);
                Value::I64(table.sequence)
            }
            Value::Null => {
                return Err(err!(
                    "cannot save `{}` without a value for identifier `{}`",
                    op.entity,
                    table.identifier
                ))
            }
            id => {
                if let Value::I64(id) = id {
                    table.sequence = table.sequence.max(id);
                }
                id
            }
        };

        tracing::trace!(entity = %op.entity, %id, "memory store save");
        table.rows.insert(key(&id), row.clone());

        Ok(Response::values(vec![row]))
    }

    fn delete(&self, op: Delete) -> Result<Response> {
        let mut tables = self.lock()?;
        let table = tables
            .get_mut(&op.entity)
            .ok_or_else(|| Error::unknown_entity(&op.entity))?;

        let removed = table.rows.shift_remove(&key(&op.id)).is_some();
        Ok(Response::count(removed as u64))
    }
}

#[onyx_core::async_trait]
impl Driver for Memory {
    async fn register_schema(&mut self, schema: &Schema) -> Result<()> {
        let mut tables = self.lock()?;

        for entity in schema.entities() {
            tables.entry(entity.name.clone()).or_insert_with(|| Table {
                identifier: entity.identifier.name.clone(),
                generator: entity.identifier.generator,
                sequence: 0,
                rows: IndexMap::new(),
            });
        }

        Ok(())
    }

    async fn exec(&self, _schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        match op {
            Operation::FindById(op) => self.find_by_id(op),
            Operation::Query(op) => self.query(op),
            Operation::Save(op) => self.save(op),
            Operation::Delete(op) => self.delete(op),
        }
    }
}

fn table<'a>(tables: &'a IndexMap<String, Table>, entity: &str) -> Result<&'a Table> {
    tables
        .get(entity)
        .ok_or_else(|| Error::unknown_entity(entity))
}

/// Identifier values of different JSON types never collide.
fn key(id: &Value) -> String {
    id.to_json().to_string()
}
