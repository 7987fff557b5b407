// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pxdb_type::Field;
use serde::Serialize;

/// Column catalog of one physical table.
#[derive(Clone, Debug, Serialize)]
pub struct TableDef {
	pub name: String,
	pub fields: Vec<Field>,
}

impl TableDef {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Appends a column; order numbers follow insertion order starting at one.
	pub fn field(mut self, name: impl Into<String>, type_code: u8, declared_size: u32) -> Self {
		let order_number = self.fields.len() + 1;
		let field = Field::physical(name, order_number, type_code, declared_size).with_table(self.name.clone());
		self.fields.push(field);
		self
	}

	/// Case-sensitive lookup, the way names are stored in the table header.
	pub fn find_field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|f| f.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_order_numbers_and_owner() {
		let table = TableDef::new("CUSTOMER").field("Customer No", 0x06, 8).field("Name", 0x01, 30);

		assert_eq!(table.fields.len(), 2);
		assert_eq!(table.fields[0].order_number, 1);
		assert_eq!(table.fields[1].order_number, 2);
		assert_eq!(table.fields[1].table_name.as_deref(), Some("CUSTOMER"));
	}

	#[test]
	fn test_find_field_is_case_sensitive() {
		let table = TableDef::new("CUSTOMER").field("Name", 0x01, 30);

		assert_eq!(table.find_field("Name").map(|f| f.declared_size()), Some(30));
		assert!(table.find_field("NAME").is_none());
		assert!(table.find_field("City").is_none());
	}
}
