// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::{Column, FieldType, Result, SqlType};

/// Bytes of the out of row block pointer that large object columns carry
/// inside their declared size.
pub const LARGE_OBJECT_HEADER: u32 = 10;

/// One column, either physical (owned by a table) or virtual (projected by a
/// view).
///
/// Two fields are equal when their names are equal, regardless of the owning
/// table or any other attribute.
#[derive(Clone, Debug, Serialize)]
pub struct Field {
	pub name: String,
	/// 1-based position inside the owning table or view list.
	pub order_number: usize,
	type_code: u8,
	declared_size: u32,
	logical_size: u32,
	pub table_name: Option<String>,
	pub alias: Option<String>,
	pub expression: Option<String>,
	pub join_tag: Option<String>,
	pub checked: bool,
}

impl Field {
	pub fn new(name: impl Into<String>, order_number: usize) -> Self {
		Self {
			name: name.into(),
			order_number,
			type_code: 0,
			declared_size: 0,
			logical_size: 0,
			table_name: None,
			alias: None,
			expression: None,
			join_tag: None,
			checked: false,
		}
	}

	/// A catalog column with its storage type and on-disk size.
	pub fn physical(name: impl Into<String>, order_number: usize, type_code: u8, declared_size: u32) -> Self {
		let mut result = Self::new(name, order_number);
		result.set_storage(type_code, declared_size);
		result
	}

	pub fn with_table(mut self, table_name: impl Into<String>) -> Self {
		self.table_name = Some(table_name.into());
		self
	}

	/// Assigns the storage type and declared size. The logical size is
	/// derived here and nowhere else.
	pub fn set_storage(&mut self, type_code: u8, declared_size: u32) {
		self.type_code = type_code;
		self.declared_size = declared_size;
		self.logical_size = if self.is_large_object() {
			declared_size.saturating_sub(LARGE_OBJECT_HEADER)
		} else {
			declared_size
		};
	}

	/// Copies type and size from the catalog column this field refers to.
	pub fn copy_storage(&mut self, source: &Field) {
		self.set_storage(source.type_code, source.declared_size);
	}

	pub fn type_code(&self) -> u8 {
		self.type_code
	}

	pub fn field_type(&self) -> Option<FieldType> {
		FieldType::from_u8(self.type_code)
	}

	pub fn sql_type(&self) -> Result<SqlType> {
		FieldType::try_from_u8(self.type_code).map(|ty| ty.sql_type())
	}

	pub fn declared_size(&self) -> u32 {
		self.declared_size
	}

	pub fn logical_size(&self) -> u32 {
		self.logical_size
	}

	pub fn is_large_object(&self) -> bool {
		self.field_type().is_some_and(|ty| ty.is_large_object())
	}

	pub fn is_auto_increment(&self) -> bool {
		self.field_type() == Some(FieldType::AutoIncrement)
	}

	/// The alias when one is set, the name otherwise.
	pub fn display_name(&self) -> &str {
		self.alias.as_deref().unwrap_or(&self.name)
	}

	pub fn column(&self) -> Result<Column> {
		Ok(Column {
			name: self.name.to_uppercase(),
			label: self.display_name().to_string(),
			sql_type: self.sql_type()?,
			size: self.logical_size,
			table_name: self.table_name.clone(),
		})
	}
}

impl PartialEq for Field {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for Field {}

impl Hash for Field {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;

	#[test]
	fn test_logical_size_matches_declared_for_in_row_types() {
		for code in [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06, 0x09, 0x14, 0x15, 0x16, 0x17, 0x18] {
			for size in 0..=u16::MAX as u32 {
				let field = Field::physical("f", 1, code, size);
				assert_eq!(field.logical_size(), size);
				assert_eq!(field.declared_size(), size);
			}
		}
	}

	#[test]
	fn test_logical_size_excludes_large_object_header() {
		for code in [0x0Cu8, 0x0D, 0x0E, 0x0F, 0x10] {
			for size in LARGE_OBJECT_HEADER..=u16::MAX as u32 {
				let field = Field::physical("f", 1, code, size);
				assert_eq!(field.logical_size(), size - LARGE_OBJECT_HEADER);
				assert_eq!(field.declared_size(), size);
			}
		}
	}

	#[test]
	fn test_logical_size_boundary() {
		assert_eq!(Field::physical("memo", 1, 0x0C, 10).logical_size(), 0);
		assert_eq!(Field::physical("memo", 1, 0x0C, 11).logical_size(), 1);
		assert_eq!(Field::physical("memo", 1, 0x0C, 4).logical_size(), 0);
	}

	#[test]
	fn test_unknown_type_keeps_declared_size() {
		let field = Field::physical("odd", 1, 0x42, 25);
		assert_eq!(field.logical_size(), 25);
		assert!(field.field_type().is_none());
		assert!(matches!(
			field.sql_type(),
			Err(Error::UnknownFieldType {
				code: 0x42
			})
		));
	}

	#[test]
	fn test_copy_storage_recomputes_logical_size() {
		let source = Field::physical("Notes", 3, 0x0C, 40);
		let mut field = Field::new("Notes", 1);
		field.copy_storage(&source);
		assert_eq!(field.type_code(), 0x0C);
		assert_eq!(field.declared_size(), 40);
		assert_eq!(field.logical_size(), 30);
	}

	#[test]
	fn test_equality_by_name_only() {
		let left = Field::physical("Name", 1, 0x01, 30).with_table("CUSTOMER");
		let mut right = Field::physical("Name", 7, 0x06, 8).with_table("ORDERS");
		right.alias = Some("Other".to_string());
		assert_eq!(left, right);

		let lower = Field::physical("name", 1, 0x01, 30);
		assert_ne!(left, lower);
	}

	#[test]
	fn test_display_name() {
		let mut field = Field::new("City", 1);
		assert_eq!(field.display_name(), "City");
		field.alias = Some("Town".to_string());
		assert_eq!(field.display_name(), "Town");
	}

	#[test]
	fn test_auto_increment() {
		assert!(Field::physical("Id", 1, 0x16, 4).is_auto_increment());
		assert!(!Field::physical("Id", 1, 0x04, 4).is_auto_increment());
	}

	#[test]
	fn test_column() {
		let mut field = Field::physical("Notes", 2, 0x0C, 50).with_table("CUSTOMER");
		field.alias = Some("Remarks".to_string());
		let column = field.column().unwrap();
		assert_eq!(column.name, "NOTES");
		assert_eq!(column.label, "Remarks");
		assert_eq!(column.sql_type, SqlType::Clob);
		assert_eq!(column.size, 40);
		assert_eq!(column.table_name.as_deref(), Some("CUSTOMER"));
	}

	#[test]
	fn test_serialize() {
		let field = Field::physical("Name", 1, 0x01, 30).with_table("CUSTOMER");
		let json = serde_json::to_value(&field).unwrap();
		assert_eq!(json["name"], "Name");
		assert_eq!(json["type_code"], 1);
		assert_eq!(json["logical_size"], 30);
		assert_eq!(json["table_name"], "CUSTOMER");
		assert!(json["alias"].is_null());
	}
}
