//! The database collaborator contract.
//!
//! The flows only ever call `insert`; storage, indexing, and everything
//! else belong to the implementer.

use std::collections::BTreeMap;

use lax_core::Value;

/// A table-oriented record sink.
pub trait Database {
    fn insert(&mut self, table: &str, record: Value);
}

/// In-memory [`Database`] backed by per-table vectors, insertion-ordered.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: BTreeMap<String, Vec<Value>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records inserted into `table`, oldest first.
    pub fn records(&self, table: &str) -> &[Value] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Database for MemoryDatabase {
    fn insert(&mut self, table: &str, record: Value) {
        tracing::debug!(table, "inserting record");
        self.tables.entry(table.to_string()).or_default().push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lax_core::val;

    #[test]
    fn test_memory_database_insert_order() {
        let mut db = MemoryDatabase::new();
        db.insert("products", val!({ "id": 1 }));
        db.insert("products", val!({ "id": 2 }));
        db.insert("orders", val!({ "id": 99 }));

        assert_eq!(db.records("products").len(), 2);
        assert_eq!(db.records("products")[0], val!({ "id": 1 }));
        assert_eq!(db.records("orders").len(), 1);
        assert!(db.records("missing").is_empty());
    }
}
