// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("table not found: {table}")]
	TableNotFound {
		table: String,
	},

	#[error("{section} token '{token}' has no table marker and no table was referenced before it")]
	UnresolvedTableToken {
		section: &'static str,
		token: String,
	},

	#[error("expression row at line {line} has {expressions} cells for {columns} columns")]
	ExpressionRowMismatch {
		line: usize,
		columns: usize,
		expressions: usize,
	},

	#[error("unknown field type 0x{code:02X}")]
	UnknownFieldType {
		code: u8,
	},

	#[error("{} is not valid {codepage} text", path.display())]
	CodepageDecode {
		path: PathBuf,
		codepage: &'static str,
	},

	#[error("cannot read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl Error {
	/// Errors caused by the bytes of one file rather than by the catalog.
	pub fn is_file_error(&self) -> bool {
		matches!(self, Error::CodepageDecode { .. } | Error::Io { .. })
	}
}
