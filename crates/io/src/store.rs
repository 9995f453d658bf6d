// Collection-addressed document store on SQLite.
//
// Documents are JSON objects in a single table keyed by collection name.
// The loader replaces whole collections; `replace_collection` runs the
// delete and the re-insert inside one transaction so a concurrent reader
// never observes a deleted-but-not-yet-reloaded collection.

use std::path::Path;

use rusqlite::{params, Connection};
use serde_json::Value;

use crate::error::IoError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    collection TEXT NOT NULL,
    doc TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
"#;

/// Filter over document fields: a conjunction of equality and membership
/// predicates.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
}

#[derive(Debug, Clone)]
enum Clause {
    Eq(String, Value),
    In(String, Vec<Value>),
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `field == value`.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push(Clause::Eq(field.to_string(), value.into()));
        self
    }

    /// `field ∈ values`.
    pub fn is_in<V: Into<Value>>(mut self, field: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.clauses.push(Clause::In(
            field.to_string(),
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.clauses.iter().all(|clause| match clause {
            Clause::Eq(field, value) => doc.get(field) == Some(value),
            Clause::In(field, values) => doc
                .get(field)
                .map(|v| values.contains(v))
                .unwrap_or(false),
        })
    }
}

/// The store operations the pipeline needs. Kept minimal on purpose: the
/// audit is read-only (`find`, `distinct`, `count`), the loader is
/// replace-only.
pub trait DocumentStore {
    fn insert_many(&mut self, collection: &str, docs: &[Value]) -> Result<usize, IoError>;
    fn delete_many(&mut self, collection: &str) -> Result<usize, IoError>;
    /// Delete-then-insert as one atomic step.
    fn replace_collection(&mut self, collection: &str, docs: &[Value]) -> Result<usize, IoError>;
    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, IoError>;
    /// Distinct string values of `field` across a collection, sorted.
    fn distinct(&self, collection: &str, field: &str) -> Result<Vec<String>, IoError>;
    fn count(&self, collection: &str) -> Result<usize, IoError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, IoError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn insert_tx(tx: &rusqlite::Transaction<'_>, collection: &str, docs: &[Value]) -> Result<usize, IoError> {
        let mut stmt = tx.prepare("INSERT INTO documents (collection, doc) VALUES (?1, ?2)")?;
        for doc in docs {
            stmt.execute(params![collection, serde_json::to_string(doc)?])?;
        }
        Ok(docs.len())
    }
}

impl DocumentStore for SqliteStore {
    fn insert_many(&mut self, collection: &str, docs: &[Value]) -> Result<usize, IoError> {
        let tx = self.conn.transaction()?;
        let inserted = Self::insert_tx(&tx, collection, docs)?;
        tx.commit()?;
        Ok(inserted)
    }

    fn delete_many(&mut self, collection: &str) -> Result<usize, IoError> {
        let deleted = self
            .conn
            .execute("DELETE FROM documents WHERE collection = ?1", params![collection])?;
        Ok(deleted)
    }

    fn replace_collection(&mut self, collection: &str, docs: &[Value]) -> Result<usize, IoError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM documents WHERE collection = ?1", params![collection])?;
        let inserted = Self::insert_tx(&tx, collection, docs)?;
        tx.commit()?;
        Ok(inserted)
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>, IoError> {
        let mut stmt = self
            .conn
            .prepare("SELECT doc FROM documents WHERE collection = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![collection], |row| row.get::<_, String>(0))?;

        let mut docs = Vec::new();
        for row in rows {
            let doc: Value = serde_json::from_str(&row?)?;
            if filter.matches(&doc) {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    fn distinct(&self, collection: &str, field: &str) -> Result<Vec<String>, IoError> {
        let mut values = std::collections::BTreeSet::new();
        for doc in self.find(collection, &Filter::new())? {
            if let Some(v) = doc.get(field).and_then(|v| v.as_str()) {
                values.insert(v.to_string());
            }
        }
        Ok(values.into_iter().collect())
    }

    fn count(&self, collection: &str) -> Result<usize, IoError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

/// Numeric field of a document, zero when absent or non-numeric — the same
/// degradation the aggregator applies to sheet cells.
pub fn doc_f64(doc: &Value, field: &str) -> f64 {
    doc.get(field).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

/// String field of a document, empty when absent.
pub fn doc_str<'a>(doc: &'a Value, field: &str) -> &'a str {
    doc.get(field).and_then(|v| v.as_str()).unwrap_or("")
}
