// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use pxdb_catalog::{FieldCatalog, TableDef};
use pxdb_type::{Error, Field, FieldType, Result};
use tracing::{debug, instrument, warn};

use crate::{expression::parse_expression, section::ColumnBlock, token::FieldRef};

/// Storage type assumed for a field the catalog does not list.
pub const FALLBACK_TYPE: FieldType = FieldType::Alpha;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
	FieldOrder,
	Sort,
}

impl Section {
	pub fn as_str(&self) -> &'static str {
		match self {
			Section::FieldOrder => "FIELDORDER",
			Section::Sort => "SORT",
		}
	}
}

/// Binds field references to the column catalog of their tables.
pub struct Resolver<'a> {
	catalog: &'a dyn FieldCatalog,
}

impl<'a> Resolver<'a> {
	pub fn new(catalog: &'a dyn FieldCatalog) -> Self {
		Self {
			catalog,
		}
	}

	/// Resolves a FIELDORDER or SORT list. A bare token continues the table
	/// of the token before it and is skipped; before any table it is an
	/// error.
	#[instrument(name = "view::resolve::section", level = "trace", skip(self, section, refs), fields(section = section.as_str()))]
	pub fn resolve_section(&self, section: Section, refs: &[FieldRef]) -> Result<Vec<Field>> {
		let mut result = Vec::with_capacity(refs.len());
		let mut last: Option<Arc<TableDef>> = None;

		for field_ref in refs {
			match field_ref {
				FieldRef::Qualified {
					marker,
					field,
				} => {
					let table = self.table(marker)?;
					result.push(resolve_field(&table, field, result.len() + 1));
					last = Some(table);
				}
				FieldRef::Bare(token) => match &last {
					None => {
						return Err(Error::UnresolvedTableToken {
							section: section.as_str(),
							token: token.clone(),
						});
					}
					Some(table) => {
						warn!(section = section.as_str(), table = %table.name, token, "skipping calculated field token");
					}
				},
			}
		}

		Ok(result)
	}

	/// Resolves the columns of one grid block, numbering them from
	/// `first_order`, and applies the expression cell of each column.
	#[instrument(name = "view::resolve::block", level = "trace", skip(self, block), fields(table = %block.table, line = block.line))]
	pub fn resolve_block(&self, block: &ColumnBlock, first_order: usize) -> Result<Vec<Field>> {
		if block.columns.is_empty() {
			return Ok(Vec::new());
		}

		let table = self.table(&block.table)?;
		let mut result = Vec::with_capacity(block.columns.len());
		for (idx, name) in block.columns.iter().enumerate() {
			let mut field = resolve_field(&table, name, first_order + idx);
			if let Some(cell) = block.clauses.get(idx).filter(|cell| !cell.is_empty()) {
				parse_expression(cell).apply(&mut field);
			}
			result.push(field);
		}
		Ok(result)
	}

	fn table(&self, marker: &str) -> Result<Arc<TableDef>> {
		self.catalog.lookup_table_fields(table_key(marker))
	}
}

/// Catalog name of a table marker: the table file name without its
/// extension, `CUSTOMER.DB` becomes `CUSTOMER`.
pub fn table_key(marker: &str) -> &str {
	let marker = marker.trim();
	match marker.rsplit_once('.') {
		Some((stem, _)) if !stem.is_empty() => stem,
		_ => marker,
	}
}

fn resolve_field(table: &TableDef, name: &str, order_number: usize) -> Field {
	let mut result = Field::new(name, order_number).with_table(table.name.clone());
	match table.find_field(name) {
		Some(source) => {
			debug!(table = %table.name, field = name, type_code = source.type_code(), "resolved field");
			result.copy_storage(source);
		}
		None => {
			warn!(table = %table.name, field = name, "field missing from catalog, assuming {FALLBACK_TYPE}");
			result.set_storage(FALLBACK_TYPE.to_u8(), 0);
		}
	}
	result
}
