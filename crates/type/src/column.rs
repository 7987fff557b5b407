// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Serialize;

use crate::SqlType;

/// Result set column metadata of a field, as a relational front end reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
	/// Upper-cased field name
	pub name: String,
	/// Alias when present, the field name otherwise
	pub label: String,
	pub sql_type: SqlType,
	/// Logical size in bytes
	pub size: u32,
	pub table_name: Option<String>,
}
