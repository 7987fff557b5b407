// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	path::{Path, PathBuf},
};

use pxdb_type::{Column, Field, Result};
use serde::Serialize;

/// Where decoding of a view file stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Termination {
	/// The first line is not the view header.
	NotAView,
	/// The end of definition literal was reached.
	EndQuery,
	/// The input ended between two blocks.
	EndOfInput,
	/// The input ended after a column row, before its expression row.
	Truncated,
}

impl Termination {
	pub fn is_valid(&self) -> bool {
		matches!(self, Termination::EndQuery | Termination::EndOfInput)
	}
}

impl Display for Termination {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Termination::NotAView => f.write_str("not-a-view"),
			Termination::EndQuery => f.write_str("end-query"),
			Termination::EndOfInput => f.write_str("end-of-input"),
			Termination::Truncated => f.write_str("truncated"),
		}
	}
}

/// Typed schema of one view file.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSchema {
	pub source_path: PathBuf,
	pub display_name: String,
	pub field_order: Vec<Field>,
	pub sort_fields: Vec<Field>,
	pub projected_fields: Vec<Field>,
	pub termination: Termination,
	pub is_valid: bool,
}

impl ViewSchema {
	pub fn new(source_path: impl Into<PathBuf>, termination: Termination) -> Self {
		let source_path = source_path.into();
		let display_name = display_name(&source_path);
		Self {
			source_path,
			display_name,
			field_order: Vec::new(),
			sort_fields: Vec::new(),
			projected_fields: Vec::new(),
			termination,
			is_valid: termination.is_valid(),
		}
	}

	/// Result set columns of the projected fields.
	pub fn columns(&self) -> Result<Vec<Column>> {
		self.projected_fields.iter().map(Field::column).collect()
	}

	/// Distinct tables of the projected fields, in order of first use.
	pub fn tables(&self) -> Vec<&str> {
		let mut result: Vec<&str> = Vec::new();
		for table in self.projected_fields.iter().filter_map(|f| f.table_name.as_deref()) {
			if !result.contains(&table) {
				result.push(table);
			}
		}
		result
	}
}

fn display_name(path: &Path) -> String {
	path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_termination_validity() {
		assert!(Termination::EndQuery.is_valid());
		assert!(Termination::EndOfInput.is_valid());
		assert!(!Termination::NotAView.is_valid());
		assert!(!Termination::Truncated.is_valid());
	}

	#[test]
	fn test_termination_display_matches_serde() {
		for termination in
			[Termination::NotAView, Termination::EndQuery, Termination::EndOfInput, Termination::Truncated]
		{
			let json = serde_json::to_value(termination).unwrap();
			assert_eq!(json, termination.to_string());
		}
	}

	#[test]
	fn test_new() {
		let schema = ViewSchema::new("/data/views/CUSTOMERS.QBE", Termination::NotAView);
		assert_eq!(schema.display_name, "CUSTOMERS.QBE");
		assert!(!schema.is_valid);
		assert!(schema.field_order.is_empty());
		assert!(schema.projected_fields.is_empty());
	}

	#[test]
	fn test_tables_in_first_use_order() {
		let mut schema = ViewSchema::new("a.qbe", Termination::EndQuery);
		schema.projected_fields = vec![
			Field::physical("Order No", 1, 0x16, 4).with_table("ORDERS"),
			Field::physical("Name", 2, 0x01, 30).with_table("CUSTOMER"),
			Field::physical("Total", 3, 0x05, 8).with_table("ORDERS"),
		];
		assert_eq!(schema.tables(), vec!["ORDERS", "CUSTOMER"]);
	}

	#[test]
	fn test_columns() {
		let mut schema = ViewSchema::new("a.qbe", Termination::EndQuery);
		schema.projected_fields = vec![Field::physical("Notes", 1, 0x0C, 20).with_table("CUSTOMER")];
		let columns = schema.columns().unwrap();
		assert_eq!(columns.len(), 1);
		assert_eq!(columns[0].name, "NOTES");
		assert_eq!(columns[0].size, 10);

		schema.projected_fields.push(Field::physical("Odd", 2, 0x42, 1));
		assert!(schema.columns().is_err());
	}
}
