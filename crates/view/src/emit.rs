// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pxdb_type::Field;

use crate::ViewSchema;

/// Renders the view as a SELECT statement over its tables: the checked
/// projected fields, ordered by the sort fields. Selection criteria under
/// unchecked columns are not rendered.
pub fn select(schema: &ViewSchema) -> String {
	let projection: Vec<String> = schema.projected_fields.iter().filter(|f| f.checked).map(emit_projection).collect();

	let mut result = String::from("SELECT ");
	if projection.is_empty() {
		result.push('*');
	} else {
		result.push_str(&projection.join(", "));
	}

	let tables = schema.tables();
	if !tables.is_empty() {
		result.push_str(" FROM ");
		result.push_str(&tables.iter().map(|t| quote(t)).collect::<Vec<_>>().join(", "));
	}

	if !schema.sort_fields.is_empty() {
		result.push_str(" ORDER BY ");
		result.push_str(&schema.sort_fields.iter().map(emit_column).collect::<Vec<_>>().join(", "));
	}

	result
}

fn emit_projection(field: &Field) -> String {
	let value = match field.expression.as_deref().and_then(calculation) {
		Some(text) => text.to_string(),
		None => emit_column(field),
	};

	match &field.alias {
		Some(alias) => format!("{value} AS {}", quote(alias)),
		None => value,
	}
}

fn emit_column(field: &Field) -> String {
	match &field.table_name {
		Some(table) => format!("{}.{}", quote(table), quote(&field.name)),
		None => quote(&field.name),
	}
}

/// Text of a `CALC` expression after the keyword.
fn calculation(expression: &str) -> Option<&str> {
	let head = expression.get(..4)?;
	head.eq_ignore_ascii_case("CALC").then(|| expression[4..].trim())
}

fn quote(identifier: &str) -> String {
	format!("\"{}\"", identifier.replace('"', "\"\""))
}
