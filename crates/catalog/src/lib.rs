// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Field catalog lookup.
//!
//! The physical table decoder owns the column catalog of every table. Views
//! only ever read it, through [`FieldCatalog`]: given a table name, return the
//! ordered fields of that table or fail with `TableNotFound`.
//!
//! Implementations must be safe for concurrent reads and stable for the
//! duration of one decoding pass.

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::sync::Arc;

use pxdb_type::Result;

mod memory;
mod table;

pub use memory::MemoryCatalog;
pub use table::TableDef;

pub trait FieldCatalog: Send + Sync {
	/// Ordered field catalog of `table`.
	fn lookup_table_fields(&self, table: &str) -> Result<Arc<TableDef>>;
}

impl<T: FieldCatalog + ?Sized> FieldCatalog for Arc<T> {
	fn lookup_table_fields(&self, table: &str) -> Result<Arc<TableDef>> {
		(**self).lookup_table_fields(table)
	}
}

impl<T: FieldCatalog + ?Sized> FieldCatalog for &T {
	fn lookup_table_fields(&self, table: &str) -> Result<Arc<TableDef>> {
		(**self).lookup_table_fields(table)
	}
}
