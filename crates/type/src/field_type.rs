// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::{Error, Result};

/// Legacy storage type of a physical table column, keyed by the single byte
/// the table header records for it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum FieldType {
	/// Fixed width character data
	Alpha,
	/// Days since the epoch of the legacy calendar
	Date,
	/// 2-byte signed integer
	Short,
	/// 4-byte signed integer
	Long,
	/// Money, stored as a double
	Currency,
	/// Double precision number
	Number,
	/// Boolean
	Logical,
	/// Text stored out of row
	Memo,
	/// Binary stored out of row
	Blob,
	/// Rich text stored out of row
	FormattedMemo,
	/// Embedded OLE object stored out of row
	Ole,
	/// Picture stored out of row
	Graphic,
	/// Milliseconds since midnight
	Time,
	/// Date and time
	Timestamp,
	/// 4-byte counter maintained by the table
	AutoIncrement,
	/// Packed decimal
	Bcd,
	/// Fixed width raw bytes
	Bytes,
}

impl FieldType {
	pub fn to_u8(&self) -> u8 {
		match self {
			FieldType::Alpha => 0x01,
			FieldType::Date => 0x02,
			FieldType::Short => 0x03,
			FieldType::Long => 0x04,
			FieldType::Currency => 0x05,
			FieldType::Number => 0x06,
			FieldType::Logical => 0x09,
			FieldType::Memo => 0x0C,
			FieldType::Blob => 0x0D,
			FieldType::FormattedMemo => 0x0E,
			FieldType::Ole => 0x0F,
			FieldType::Graphic => 0x10,
			FieldType::Time => 0x14,
			FieldType::Timestamp => 0x15,
			FieldType::AutoIncrement => 0x16,
			FieldType::Bcd => 0x17,
			FieldType::Bytes => 0x18,
		}
	}

	pub fn from_u8(code: u8) -> Option<Self> {
		match code {
			0x01 => Some(FieldType::Alpha),
			0x02 => Some(FieldType::Date),
			0x03 => Some(FieldType::Short),
			0x04 => Some(FieldType::Long),
			0x05 => Some(FieldType::Currency),
			0x06 => Some(FieldType::Number),
			0x09 => Some(FieldType::Logical),
			0x0C => Some(FieldType::Memo),
			0x0D => Some(FieldType::Blob),
			0x0E => Some(FieldType::FormattedMemo),
			0x0F => Some(FieldType::Ole),
			0x10 => Some(FieldType::Graphic),
			0x14 => Some(FieldType::Time),
			0x15 => Some(FieldType::Timestamp),
			0x16 => Some(FieldType::AutoIncrement),
			0x17 => Some(FieldType::Bcd),
			0x18 => Some(FieldType::Bytes),
			_ => None,
		}
	}

	/// Like [`FieldType::from_u8`], failing with [`Error::UnknownFieldType`].
	pub fn try_from_u8(code: u8) -> Result<Self> {
		Self::from_u8(code).ok_or(Error::UnknownFieldType {
			code,
		})
	}

	pub fn sql_type(&self) -> SqlType {
		match self {
			FieldType::Alpha => SqlType::Varchar,
			FieldType::Date => SqlType::Date,
			FieldType::Short | FieldType::Long | FieldType::AutoIncrement => SqlType::Integer,
			FieldType::Currency | FieldType::Number => SqlType::Double,
			FieldType::Logical => SqlType::Boolean,
			FieldType::Memo => SqlType::Clob,
			FieldType::Blob | FieldType::FormattedMemo | FieldType::Ole | FieldType::Graphic => SqlType::Blob,
			FieldType::Time => SqlType::Time,
			FieldType::Timestamp => SqlType::Timestamp,
			FieldType::Bcd => SqlType::Numeric,
			FieldType::Bytes => SqlType::Binary,
		}
	}

	/// Out of row types. Their declared size includes a 10 byte block
	/// pointer that is not part of the value.
	pub fn is_large_object(&self) -> bool {
		self.sql_type().is_large_object()
	}
}

impl Display for FieldType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			FieldType::Alpha => f.write_str("Alpha"),
			FieldType::Date => f.write_str("Date"),
			FieldType::Short => f.write_str("Short"),
			FieldType::Long => f.write_str("Long"),
			FieldType::Currency => f.write_str("Currency"),
			FieldType::Number => f.write_str("Number"),
			FieldType::Logical => f.write_str("Logical"),
			FieldType::Memo => f.write_str("Memo"),
			FieldType::Blob => f.write_str("Blob"),
			FieldType::FormattedMemo => f.write_str("FormattedMemo"),
			FieldType::Ole => f.write_str("Ole"),
			FieldType::Graphic => f.write_str("Graphic"),
			FieldType::Time => f.write_str("Time"),
			FieldType::Timestamp => f.write_str("Timestamp"),
			FieldType::AutoIncrement => f.write_str("AutoIncrement"),
			FieldType::Bcd => f.write_str("Bcd"),
			FieldType::Bytes => f.write_str("Bytes"),
		}
	}
}

/// Relational type a legacy column is exposed as.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SqlType {
	Varchar,
	Date,
	Integer,
	Double,
	Boolean,
	Clob,
	Blob,
	Time,
	Timestamp,
	Numeric,
	Binary,
}

impl SqlType {
	pub fn is_large_object(&self) -> bool {
		matches!(self, SqlType::Clob | SqlType::Blob)
	}
}

impl Display for SqlType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SqlType::Varchar => f.write_str("VARCHAR"),
			SqlType::Date => f.write_str("DATE"),
			SqlType::Integer => f.write_str("INTEGER"),
			SqlType::Double => f.write_str("DOUBLE"),
			SqlType::Boolean => f.write_str("BOOLEAN"),
			SqlType::Clob => f.write_str("CLOB"),
			SqlType::Blob => f.write_str("BLOB"),
			SqlType::Time => f.write_str("TIME"),
			SqlType::Timestamp => f.write_str("TIMESTAMP"),
			SqlType::Numeric => f.write_str("NUMERIC"),
			SqlType::Binary => f.write_str("BINARY"),
		}
	}
}
