// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Catalog snapshot read from JSON:
//!
//! ```json
//! {"tables": [{"name": "CUSTOMER", "fields": [{"name": "Name", "type": 1, "size": 30}]}]}
//! ```

use std::{fs, path::Path};

use pxdb_catalog::{MemoryCatalog, TableDef};
use serde::Deserialize;
use tracing::debug;

use crate::CliError;

#[derive(Debug, Deserialize)]
struct CatalogFile {
	tables: Vec<TableEntry>,
}

#[derive(Debug, Deserialize)]
struct TableEntry {
	name: String,
	#[serde(default)]
	fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
struct FieldEntry {
	name: String,
	#[serde(rename = "type")]
	type_code: u8,
	size: u32,
}

pub fn load(path: &Path) -> Result<MemoryCatalog, CliError> {
	let text = fs::read_to_string(path).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let result = parse(&text).map_err(|source| CliError::Catalog {
		path: path.to_path_buf(),
		source,
	})?;
	debug!(path = %path.display(), tables = result.len(), "loaded catalog");
	Ok(result)
}

pub fn parse(text: &str) -> serde_json::Result<MemoryCatalog> {
	let file: CatalogFile = serde_json::from_str(text)?;
	let result = MemoryCatalog::new();
	for table in file.tables {
		let def = table.fields.into_iter().fold(TableDef::new(table.name), |def, field| {
			def.field(field.name, field.type_code, field.size)
		});
		result.insert(def);
	}
	Ok(result)
}
