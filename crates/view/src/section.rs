// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Splits the lines of a view file into its sections.
//!
//! ```text
//! Query
//! ANSWER: :PRIV:ANSWER.DB
//!
//! FIELDORDER: CUSTOMER.DB->"Customer No", CUSTOMER.DB->"Name",
//! CUSTOMER.DB->"City"
//!
//! SORT: CUSTOMER.DB->"Name"
//!
//! CUSTOMER.DB | Customer No | Name            | City  |
//!             | Check       | Check AS Client | Check |
//!
//! EndQuery
//! ```
//!
//! Every step works on an index into the already split lines and returns the
//! index it stopped at; nothing here touches the catalog.

use pxdb_type::{Error, Result};
use tracing::{instrument, trace};

use crate::{
	Termination,
	token::{FieldRef, field_refs, row_cells},
};

pub const HEADER: &str = "Query";
pub const FIELD_ORDER: &str = "FIELDORDER: ";
pub const SORT: &str = "SORT: ";
pub const END_QUERY: &str = "EndQuery";

/// One table row of the query grid together with its expression row.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBlock {
	/// 1-based line number of the column row
	pub line: usize,
	pub table: String,
	pub columns: Vec<String>,
	/// Expression cells; cell `k` belongs to column `k`. May be shorter than
	/// `columns`.
	pub clauses: Vec<String>,
}

/// Sections of a view file, before any catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct RawView {
	pub field_order: Vec<FieldRef>,
	pub sort: Vec<FieldRef>,
	pub blocks: Vec<ColumnBlock>,
	pub termination: Termination,
}

impl RawView {
	fn new(termination: Termination) -> Self {
		Self {
			field_order: Vec::new(),
			sort: Vec::new(),
			blocks: Vec::new(),
			termination,
		}
	}
}

#[instrument(name = "view::section::decode", level = "trace", skip(lines), fields(lines = lines.len()))]
pub fn decode_sections(lines: &[&str]) -> Result<RawView> {
	if lines.first() != Some(&HEADER) {
		return Ok(RawView::new(Termination::NotAView));
	}

	let mut raw = RawView::new(Termination::EndOfInput);

	// answer table and separator
	let Some(at) = skip(lines, 1, 2) else {
		return Ok(raw);
	};
	let Some((mut current, mut at)) = content(lines, at) else {
		return Ok(raw);
	};

	if let Some(list) = current.strip_prefix(FIELD_ORDER) {
		let (text, next) = continued(lines, list, at);
		raw.field_order = field_refs(&text);
		trace!(refs = raw.field_order.len(), "field order");

		let Some(next) = skip(lines, next, 1) else {
			return Ok(raw);
		};
		let Some((line, next)) = content(lines, next) else {
			return Ok(raw);
		};
		current = line;
		at = next;
	}

	if let Some(list) = current.strip_prefix(SORT) {
		let (text, next) = continued(lines, list, at);
		raw.sort = field_refs(&text);
		trace!(refs = raw.sort.len(), "sort");

		let Some(next) = skip(lines, next, 1) else {
			return Ok(raw);
		};
		let Some((line, next)) = content(lines, next) else {
			return Ok(raw);
		};
		current = line;
		at = next;
	}

	loop {
		if current == END_QUERY {
			raw.termination = Termination::EndQuery;
			return Ok(raw);
		}

		let Some(block) = column_block(lines, current, at)? else {
			raw.termination = Termination::Truncated;
			return Ok(raw);
		};
		trace!(table = %block.table, columns = block.columns.len(), "column block");
		raw.blocks.push(block);

		// past the expression row and its separator
		let Some(next) = skip(lines, at + 1, 1) else {
			raw.termination = Termination::Truncated;
			return Ok(raw);
		};
		let Some((line, next)) = content(lines, next) else {
			return Ok(raw);
		};
		current = line;
		at = next;
	}
}

/// Index after skipping `count` lines starting at `at`, or `None` when the
/// input ends first.
fn skip(lines: &[&str], at: usize, count: usize) -> Option<usize> {
	let next = at + count;
	(next <= lines.len()).then_some(next)
}

/// Line at `at` and the index after it.
fn content<'a>(lines: &[&'a str], at: usize) -> Option<(&'a str, usize)> {
	lines.get(at).map(|line| (*line, at + 1))
}

/// Joins `first` with the following lines while the text ends with a comma.
fn continued(lines: &[&str], first: &str, mut at: usize) -> (String, usize) {
	let mut text = first.to_string();
	while text.ends_with(',') {
		let Some(line) = lines.get(at) else {
			break;
		};
		text.push_str(line);
		at += 1;
	}
	(text, at)
}

/// Reads the column row `current` (line index `at - 1`) and the expression
/// row at `at`. `None` when the expression row is missing.
fn column_block(lines: &[&str], current: &str, at: usize) -> Result<Option<ColumnBlock>> {
	let Some(expressions) = lines.get(at) else {
		return Ok(None);
	};

	let cells = row_cells(current);
	let (table, columns) = match cells.split_first() {
		Some((table, columns)) => (table.to_string(), columns.iter().map(|c| c.to_string()).collect::<Vec<_>>()),
		None => (String::new(), Vec::new()),
	};

	let clauses: Vec<String> = row_cells(expressions).iter().skip(1).map(|c| c.to_string()).collect();
	if clauses.len() > columns.len() {
		return Err(Error::ExpressionRowMismatch {
			line: at + 1,
			columns: columns.len(),
			expressions: clauses.len(),
		});
	}

	Ok(Some(ColumnBlock {
		line: at,
		table,
		columns,
		clauses,
	}))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lines::split_lines;

	fn decode(text: &str) -> RawView {
		decode_sections(&split_lines(text)).unwrap()
	}

	fn qualified(marker: &str, field: &str) -> FieldRef {
		FieldRef::Qualified {
			marker: marker.to_string(),
			field: field.to_string(),
		}
	}

	const CUSTOMER: &str = "Query\r\n\
		ANSWER: :PRIV:ANSWER.DB\r\n\
		\r\n\
		FIELDORDER: CUSTOMER.DB->\"Customer No\", CUSTOMER.DB->\"Name\",\r\n\
		CUSTOMER.DB->\"City\"\r\n\
		\r\n\
		SORT: CUSTOMER.DB->\"Name\"\r\n\
		\r\n\
		CUSTOMER.DB | Customer No | Name            | City  |\r\n\
		            | Check       | Check AS Client | Check |\r\n\
		\r\n\
		EndQuery\r\n";

	#[test]
	fn test_full_definition() {
		let raw = decode(CUSTOMER);
		assert_eq!(raw.termination, Termination::EndQuery);
		assert_eq!(
			raw.field_order,
			vec![
				qualified("CUSTOMER.DB", "Customer No"),
				qualified("CUSTOMER.DB", "Name"),
				qualified("CUSTOMER.DB", "City")
			]
		);
		assert_eq!(raw.sort, vec![qualified("CUSTOMER.DB", "Name")]);
		assert_eq!(
			raw.blocks,
			vec![ColumnBlock {
				line: 9,
				table: "CUSTOMER.DB".to_string(),
				columns: vec!["Customer No".to_string(), "Name".to_string(), "City".to_string()],
				clauses: vec!["Check".to_string(), "Check AS Client".to_string(), "Check".to_string()],
			}]
		);
	}

	#[test]
	fn test_not_a_view() {
		let raw = decode("Table\r\nEndQuery\r\n");
		assert_eq!(raw.termination, Termination::NotAView);
		assert!(raw.field_order.is_empty());
		assert!(raw.blocks.is_empty());

		assert_eq!(decode("").termination, Termination::NotAView);
	}

	#[test]
	fn test_end_of_input_in_header() {
		assert_eq!(decode("Query").termination, Termination::EndOfInput);
		assert_eq!(decode("Query\nANSWER: :PRIV:ANSWER.DB").termination, Termination::EndOfInput);
		assert_eq!(decode("Query\nANSWER: :PRIV:ANSWER.DB\n\n").termination, Termination::EndOfInput);
	}

	#[test]
	fn test_end_of_input_after_field_order() {
		let raw = decode("Query\nANSWER\n\nFIELDORDER: A.DB->\"x\",\nA.DB->\"y\"");
		assert_eq!(raw.termination, Termination::EndOfInput);
		assert_eq!(raw.field_order, vec![qualified("A.DB", "x"), qualified("A.DB", "y")]);
	}

	#[test]
	fn test_end_of_input_inside_continuation() {
		let raw = decode("Query\nANSWER\n\nFIELDORDER: A.DB->\"x\",");
		assert_eq!(raw.termination, Termination::EndOfInput);
		assert_eq!(raw.field_order, vec![qualified("A.DB", "x")]);
	}

	#[test]
	fn test_sort_without_field_order() {
		let raw = decode("Query\nANSWER\n\nSORT: A.DB->\"x\"\n\nEndQuery");
		assert!(raw.field_order.is_empty());
		assert_eq!(raw.sort, vec![qualified("A.DB", "x")]);
		assert_eq!(raw.termination, Termination::EndQuery);
	}

	#[test]
	fn test_continuation_concatenates_without_separator() {
		assert_eq!(continued(&["A,", "B", "C"], "x,", 0), ("x,A,B".to_string(), 2));
		assert_eq!(continued(&["A"], "x", 0), ("x".to_string(), 0));
	}

	#[test]
	fn test_continuation_over_several_lines() {
		let raw = decode("Query\nANSWER\n\nSORT: A.DB->\"x\",\nA.DB->\"y\",\nA.DB->\"z\"\n\nEndQuery");
		assert_eq!(raw.sort, vec![qualified("A.DB", "x"), qualified("A.DB", "y"), qualified("A.DB", "z")]);
		assert_eq!(raw.termination, Termination::EndQuery);
	}

	#[test]
	fn test_several_blocks() {
		let raw = decode(
			"Query\nANSWER\n\n\
			CUSTOMER.DB | Customer No | Name |\n\
			            | _join1      | Check |\n\
			\n\
			ORDERS.DB | Customer No |\n\
			          | _join1      |\n\
			\n\
			EndQuery",
		);
		assert_eq!(raw.termination, Termination::EndQuery);
		assert_eq!(raw.blocks.len(), 2);
		assert_eq!(raw.blocks[1].table, "ORDERS.DB");
		assert_eq!(raw.blocks[1].columns, vec!["Customer No".to_string()]);
		assert_eq!(raw.blocks[1].clauses, vec!["_join1".to_string()]);
		assert_eq!(raw.blocks[1].line, 7);
	}

	#[test]
	fn test_short_expression_row() {
		let raw = decode("Query\nANSWER\n\nA.DB | x | y | z |\n | Check | |\n\nEndQuery");
		assert_eq!(raw.blocks[0].clauses, vec!["Check".to_string()]);
	}

	#[test]
	fn test_long_expression_row() {
		let err = decode_sections(&split_lines("Query\nANSWER\n\nA.DB | x |\n | Check | Check |\n\nEndQuery"))
			.unwrap_err();
		assert!(matches!(
			err,
			Error::ExpressionRowMismatch {
				line: 5,
				columns: 1,
				expressions: 2
			}
		));
	}

	#[test]
	fn test_missing_expression_row_truncates() {
		let raw = decode("Query\nANSWER\n\nA.DB | x |\n | Check |\n\nB.DB | y |");
		assert_eq!(raw.termination, Termination::Truncated);
		assert_eq!(raw.blocks.len(), 1);
		assert_eq!(raw.blocks[0].table, "A.DB");
	}

	#[test]
	fn test_missing_separator_after_expression_row_truncates() {
		let raw = decode("Query\nANSWER\n\nA.DB | x |\n | Check |");
		assert_eq!(raw.termination, Termination::Truncated);
		assert_eq!(raw.blocks.len(), 1);
	}

	#[test]
	fn test_end_of_input_after_separator() {
		let raw = decode("Query\nANSWER\n\nA.DB | x |\n | Check |\n\n");
		assert_eq!(raw.termination, Termination::EndOfInput);
		assert_eq!(raw.blocks.len(), 1);
	}

	#[test]
	fn test_header_is_exact() {
		assert_eq!(decode("query\nANSWER\n\nEndQuery").termination, Termination::NotAView);
		assert_eq!(decode("  Query  \nANSWER\n\nEndQuery").termination, Termination::EndQuery);
	}

	#[test]
	fn test_same_lines_same_result() {
		let lines = split_lines(CUSTOMER);
		assert_eq!(decode_sections(&lines).unwrap(), decode_sections(&lines).unwrap());
	}
}
