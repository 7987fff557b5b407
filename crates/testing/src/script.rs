// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Golden scripts: a file of commands, each followed by its expected output.
//!
//! ```text
//! # comment lines before the first command are kept as they are
//! > view CUSTOMERS.QBE
//! Query
//! ...
//! ----
//! view CUSTOMERS.QBE
//! valid true (end-query)
//!
//! > !view BROKEN.QBE
//! ...
//! ----
//! table not found: VENDORS
//! ```
//!
//! Every line between the command line and `----` is the command input,
//! everything after `----` up to the next command is the expected output.
//! A command prefixed with `!` is expected to fail; its error message is the
//! output. Scripts are checked as golden files: with `UPDATE_GOLDENFILES=1`
//! the script is rewritten with the actual output instead of being compared.

use std::{
	error::Error,
	fs,
	io::{self, Write as _},
	path::Path,
};

use goldenfile::Mint;
use nom::{
	IResult,
	branch::alt,
	bytes::complete::{tag, take_till1},
	character::complete::{char, line_ending, not_line_ending},
	combinator::{all_consuming, cut, eof, not, opt, verify},
	multi::{many_till, many0},
	sequence::{preceded, terminated, tuple},
};
use nom_locate::LocatedSpan;

const COMMAND: &str = "> ";
const SEPARATOR: &str = "----";

type Span<'a> = LocatedSpan<&'a str>;

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
	/// 1-based line number of the command line
	pub line_number: usize,
	pub name: String,
	pub args: Vec<String>,
	pub fail: bool,
	/// Input lines, each terminated by a newline
	pub input: String,
	/// Expected output without trailing blank lines
	pub expected: String,
	header: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Script {
	pub preamble: String,
	pub blocks: Vec<Block>,
}

pub trait Runner {
	/// Runs one command, returning its output.
	fn run(&mut self, block: &Block) -> Result<String, Box<dyn Error>>;
}

pub fn parse(text: &str) -> io::Result<Script> {
	match script(Span::new(text)) {
		Ok((_, result)) => Ok(result),
		Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
			Err(invalid(err.input.location_line(), &format!("unexpected input ({:?})", err.code)))
		}
		Err(nom::Err::Incomplete(_)) => Err(invalid(0, "incomplete script")),
	}
}

fn script(input: Span) -> IResult<Span, Script> {
	let (input, (preamble, blocks)) = all_consuming(tuple((many0(text_line), many0(block))))(input)?;

	let mut result = Script {
		preamble: String::new(),
		blocks,
	};
	for line in preamble {
		result.preamble.push_str(line.fragment());
		result.preamble.push('\n');
	}
	Ok((input, result))
}

/// `> [!]name args`, the input up to `----`, then the expected output.
fn block(input: Span) -> IResult<Span, Block> {
	let line_number = input.location_line() as usize;
	let (input, (fail, name, rest)) =
		preceded(tag(COMMAND), tuple((opt(char('!')), take_till1(|c: char| c.is_whitespace()), rest_of_line)))(
			input,
		)?;
	let (input, (lines, _)) = cut(many_till(line, separator))(input)?;
	let (input, expected) = many0(text_line)(input)?;

	let mut text = String::new();
	for line in lines {
		text.push_str(line.fragment());
		text.push('\n');
	}
	let expected: Vec<&str> = expected.iter().map(|line| *line.fragment()).collect();

	Ok((
		input,
		Block {
			line_number,
			name: name.fragment().to_string(),
			args: rest.fragment().split_whitespace().map(str::to_string).collect(),
			fail: fail.is_some(),
			input: text,
			expected: expected.join("\n").trim_end().to_string(),
			header: format!("{}{}{}", if fail.is_some() { "!" } else { "" }, name.fragment(), rest.fragment()),
		},
	))
}

/// A line without its terminator; never matches at the end of input.
fn line(input: Span) -> IResult<Span, Span> {
	alt((
		terminated(not_line_ending, line_ending),
		terminated(verify(not_line_ending, |line: &Span| !line.fragment().is_empty()), eof),
	))(input)
}

fn text_line(input: Span) -> IResult<Span, Span> {
	preceded(not(tag(COMMAND)), line)(input)
}

fn rest_of_line(input: Span) -> IResult<Span, Span> {
	terminated(not_line_ending, alt((line_ending, eof)))(input)
}

fn separator(input: Span) -> IResult<Span, Span> {
	terminated(tag(SEPARATOR), alt((line_ending, eof)))(input)
}

/// Runs every command of `script`, returning the script text with the actual
/// outputs in place of the expected ones.
pub fn generate<R: Runner>(runner: &mut R, script: &Script) -> io::Result<String> {
	let mut result = script.preamble.clone();

	for (i, block) in script.blocks.iter().enumerate() {
		let output = match (runner.run(block), block.fail) {
			(Ok(output), false) => output,
			(Err(err), true) => err.to_string(),
			(Ok(output), true) => {
				return Err(io::Error::other(format!(
					"expected '{}' at line {} to fail, it succeeded with: {output}",
					block.name, block.line_number
				)));
			}
			(Err(err), false) => {
				return Err(io::Error::other(format!(
					"'{}' at line {} failed: {err}",
					block.name, block.line_number
				)));
			}
		};

		if i > 0 {
			result.push('\n');
		}
		result.push_str(&format!("{COMMAND}{}\n", block.header));
		result.push_str(&block.input);
		result.push_str(SEPARATOR);
		result.push('\n');
		let output = output.trim_end();
		if !output.is_empty() {
			result.push_str(output);
			result.push('\n');
		}
	}

	Ok(result)
}

/// Runs the script at `path` and checks the output against it as a golden
/// file. A difference panics when the mint is dropped.
pub fn run_path<R: Runner>(runner: &mut R, path: impl AsRef<Path>) -> io::Result<()> {
	let path = path.as_ref();
	let (Some(dir), Some(name)) = (path.parent(), path.file_name()) else {
		return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("invalid path '{}'", path.display())));
	};

	let input = fs::read_to_string(path)?;
	let output = generate(runner, &parse(&input)?)?;

	Mint::new(dir).new_goldenfile(name)?.write_all(output.as_bytes())
}

fn invalid(line: u32, message: &str) -> io::Error {
	io::Error::new(io::ErrorKind::InvalidData, format!("line {line}: {message}"))
}
