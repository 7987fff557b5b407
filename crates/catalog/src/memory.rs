// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use pxdb_type::{Error, Result};
use tracing::{instrument, trace};

use crate::{FieldCatalog, TableDef};

/// Field catalog held in memory, keyed by table name without regard to case.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
	tables: RwLock<HashMap<String, Arc<TableDef>>>,
}

impl MemoryCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `table`, replacing a table with the same name.
	pub fn insert(&self, table: TableDef) {
		self.tables.write().insert(key(&table.name), Arc::new(table));
	}

	pub fn with_table(self, table: TableDef) -> Self {
		self.insert(table);
		self
	}

	pub fn len(&self) -> usize {
		self.tables.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.read().is_empty()
	}
}

impl FieldCatalog for MemoryCatalog {
	#[instrument(name = "catalog::memory::lookup", level = "trace", skip(self))]
	fn lookup_table_fields(&self, table: &str) -> Result<Arc<TableDef>> {
		match self.tables.read().get(&key(table)) {
			Some(found) => Ok(Arc::clone(found)),
			None => {
				trace!(table, "table missing from catalog");
				Err(Error::TableNotFound {
					table: table.to_string(),
				})
			}
		}
	}
}

fn key(name: &str) -> String {
	name.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
	use rayon::prelude::*;

	use super::*;

	fn catalog() -> MemoryCatalog {
		MemoryCatalog::new()
			.with_table(TableDef::new("CUSTOMER").field("Customer No", 0x06, 8).field("Name", 0x01, 30))
			.with_table(TableDef::new("Orders").field("Order No", 0x16, 4))
	}

	#[test]
	fn test_lookup() {
		let catalog = catalog();
		let table = catalog.lookup_table_fields("CUSTOMER").unwrap();
		assert_eq!(table.name, "CUSTOMER");
		assert_eq!(table.fields.len(), 2);
	}

	#[test]
	fn test_lookup_ignores_case() {
		let catalog = catalog();
		assert_eq!(catalog.lookup_table_fields("customer").unwrap().name, "CUSTOMER");
		assert_eq!(catalog.lookup_table_fields("ORDERS").unwrap().name, "Orders");
		assert_eq!(catalog.lookup_table_fields(" orders ").unwrap().name, "Orders");
	}

	#[test]
	fn test_lookup_missing_table() {
		let catalog = catalog();
		let err = catalog.lookup_table_fields("VENDORS").unwrap_err();
		assert!(matches!(err, Error::TableNotFound { ref table } if table == "VENDORS"));
		assert_eq!(err.to_string(), "table not found: VENDORS");
	}

	#[test]
	fn test_insert_replaces() {
		let catalog = catalog();
		catalog.insert(TableDef::new("customer").field("Id", 0x16, 4));
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.lookup_table_fields("CUSTOMER").unwrap().fields.len(), 1);
	}

	#[test]
	fn test_concurrent_reads() {
		let catalog = catalog();
		let found: Vec<usize> = (0..64)
			.into_par_iter()
			.map(|_| catalog.lookup_table_fields("customer").unwrap().fields.len())
			.collect();
		assert!(found.iter().all(|&n| n == 2));
	}

	#[test]
	fn test_shared_through_arc() {
		let catalog: Arc<dyn FieldCatalog> = Arc::new(catalog());
		assert!(catalog.lookup_table_fields("Orders").is_ok());
		assert!(MemoryCatalog::new().is_empty());
	}
}
