// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Tokens of the FIELDORDER and SORT lists and of the pipe delimited column
//! rows.

use crate::lines::trim;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	// Unquoted text, e.g. a table marker
	Word(String),
	// Text between double quotes, e.g. a field name
	Quoted(String),
	Arrow, // ->
	Comma, // ,
}

/// A field reference taken from a FIELDORDER or SORT list.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRef {
	/// `marker->"field"`
	Qualified {
		marker: String,
		field: String,
	},
	/// A token without `->`; the legacy tool writes these for calculated
	/// columns and continues the table of the previous token.
	Bare(String),
}

pub fn tokenize(text: &str) -> Vec<Token> {
	let mut tokens = Vec::new();
	let chars: Vec<char> = text.chars().collect();
	let len = chars.len();
	let mut i = 0;

	while i < len {
		let c = chars[i];

		if c.is_whitespace() {
			i += 1;
			continue;
		}

		match c {
			',' => {
				tokens.push(Token::Comma);
				i += 1;
				continue;
			}
			'-' if i + 1 < len && chars[i + 1] == '>' => {
				tokens.push(Token::Arrow);
				i += 2;
				continue;
			}
			'"' => {
				i += 1;
				let start = i;
				while i < len && chars[i] != '"' {
					i += 1;
				}
				// an unterminated quote runs to the end of the text
				tokens.push(Token::Quoted(chars[start..i].iter().collect()));
				i += 1;
				continue;
			}
			_ => {}
		}

		let start = i;
		while i < len && !is_word_end(&chars, i) {
			i += 1;
		}
		tokens.push(Token::Word(chars[start..i].iter().collect()));
	}

	tokens
}

fn is_word_end(chars: &[char], i: usize) -> bool {
	match chars[i] {
		',' | '"' => true,
		'-' => chars.get(i + 1) == Some(&'>'),
		c => c.is_whitespace(),
	}
}

/// Parses a FIELDORDER or SORT list into field references. Empty entries are
/// dropped.
pub fn field_refs(text: &str) -> Vec<FieldRef> {
	tokenize(text).split(|t| *t == Token::Comma).filter(|entry| !entry.is_empty()).map(field_ref).collect()
}

fn field_ref(entry: &[Token]) -> FieldRef {
	match entry.iter().position(|t| *t == Token::Arrow) {
		Some(arrow) => FieldRef::Qualified {
			marker: join(&entry[..arrow]),
			field: join(&entry[arrow + 1..]),
		},
		None => FieldRef::Bare(join(entry)),
	}
}

fn join(tokens: &[Token]) -> String {
	let mut result = String::new();
	for token in tokens {
		let text = match token {
			Token::Word(text) | Token::Quoted(text) => text.as_str(),
			Token::Arrow => "->",
			Token::Comma => ",",
		};
		if !result.is_empty() {
			result.push(' ');
		}
		result.push_str(text);
	}
	result
}

/// Splits a pipe delimited row into trimmed cells. Trailing empty cells are
/// dropped.
pub fn row_cells(line: &str) -> Vec<&str> {
	let mut cells: Vec<&str> = line.split('|').map(trim).collect();
	while cells.last().is_some_and(|cell| cell.is_empty()) {
		cells.pop();
	}
	cells
}
