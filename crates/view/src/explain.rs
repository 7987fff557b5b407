// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use pxdb_type::Field;

use crate::ViewSchema;

/// Line oriented description of a decoded view.
pub fn explain_view(schema: &ViewSchema) -> String {
	let mut result = String::new();

	result.push_str(&format!("view {}\n", schema.display_name));
	result.push_str(&format!("valid {} ({})\n", schema.is_valid, schema.termination));

	for (title, fields) in [
		("field order", &schema.field_order),
		("sort", &schema.sort_fields),
		("projected", &schema.projected_fields),
	] {
		result.push_str(title);
		result.push('\n');
		for field in fields {
			result.push_str(&format!("  {}\n", explain_field(field)));
		}
	}

	result
}

pub fn explain_field(field: &Field) -> String {
	let mut result = format!("{:>2} ", field.order_number);

	if let Some(table) = &field.table_name {
		result.push_str(&format!("{table}."));
	}

	let ty = match field.field_type() {
		Some(ty) => ty.to_string(),
		None => format!("0x{:02X}", field.type_code()),
	};
	result.push_str(&format!("{}: {}({})", field.name, ty, field.logical_size()));

	if field.checked {
		result.push_str(" checked");
	}
	if let Some(tag) = &field.join_tag {
		result.push_str(&format!(" join {tag}"));
	}
	if let Some(expression) = &field.expression {
		result.push_str(&format!(" expression `{expression}`"));
	}
	if let Some(alias) = &field.alias {
		result.push_str(&format!(" alias `{alias}`"));
	}

	result
}
