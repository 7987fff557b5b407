// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Parses the text under one column of the query grid, e.g.
//! `Check _JOIN1 custno->"Name" AS FullName`.

use pxdb_type::Field;
use serde::Serialize;

const CHECK: &str = "Check";
const CALC: &str = "CALC";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpressionClause {
	pub checked: bool,
	pub join_tag: Option<String>,
	pub expression: Option<String>,
	pub alias: Option<String>,
}

impl ExpressionClause {
	pub fn apply(self, field: &mut Field) {
		field.checked = self.checked;
		field.join_tag = self.join_tag;
		field.expression = self.expression;
		field.alias = self.alias;
	}
}

/// Never fails; text that matches no rule ends up as the expression.
pub fn parse_expression(raw: &str) -> ExpressionClause {
	let mut result = ExpressionClause::default();
	let mut rest = raw.trim();

	if let Some(after) = strip_check(rest) {
		result.checked = true;
		rest = after.trim_start();
	}

	if rest.starts_with('_') {
		let end = rest.find([' ', ',']).unwrap_or(rest.len());
		result.join_tag = Some(rest[..end].to_string());
		rest = &rest[end..];
	}

	let rest = rest.trim();
	if let Some(alias) = strip_keyword_as(rest) {
		result.alias = non_empty(alias);
		return result;
	}

	let rest = rest.strip_prefix(',').unwrap_or(rest);
	match rightmost_as(rest) {
		Some(at) => {
			result.expression = non_empty(&rest[..at]);
			result.alias = non_empty(&rest[at + 2..]);
		}
		None => result.expression = non_empty(rest),
	}

	if result.expression.as_deref().is_some_and(starts_with_calc) {
		result.checked = true;
	}

	result
}

/// Text after a leading `Check` and its one separator character.
fn strip_check(text: &str) -> Option<&str> {
	let after = text.strip_prefix(CHECK)?;
	match after.chars().next() {
		None => Some(after),
		Some(c) if c.is_whitespace() || c == ',' => Some(&after[c.len_utf8()..]),
		Some(_) => None,
	}
}

/// Text after a leading `AS` word.
fn strip_keyword_as(text: &str) -> Option<&str> {
	let bytes = text.as_bytes();
	if bytes.len() >= 2 && is_as(bytes, 0) {
		Some(&text[2..])
	} else {
		None
	}
}

/// Byte offset of the last `AS` word.
fn rightmost_as(text: &str) -> Option<usize> {
	let bytes = text.as_bytes();
	(0..bytes.len().saturating_sub(1)).rev().find(|&at| is_as(bytes, at))
}

fn is_as(bytes: &[u8], at: usize) -> bool {
	bytes[at].eq_ignore_ascii_case(&b'A')
		&& bytes[at + 1].eq_ignore_ascii_case(&b'S')
		&& (at == 0 || bytes[at - 1].is_ascii_whitespace())
		&& bytes.get(at + 2).is_none_or(|b| b.is_ascii_whitespace())
}

fn starts_with_calc(text: &str) -> bool {
	text.get(..CALC.len()).is_some_and(|head| head.eq_ignore_ascii_case(CALC))
}

fn non_empty(text: &str) -> Option<String> {
	let text = text.trim();
	(!text.is_empty()).then(|| text.to_string())
}
