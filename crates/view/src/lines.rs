// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Splits `text` into trimmed lines. `\r\n`, `\n` and `\r` all end a line; a
/// terminator at the very end does not open another one.
pub fn split_lines(text: &str) -> Vec<&str> {
	let mut lines = Vec::new();
	let mut rest = text;

	while !rest.is_empty() {
		match rest.find(['\r', '\n']) {
			Some(end) => {
				lines.push(trim(&rest[..end]));
				let terminator = if rest[end..].starts_with("\r\n") {
					2
				} else {
					1
				};
				rest = &rest[end + terminator..];
			}
			None => {
				lines.push(trim(rest));
				break;
			}
		}
	}

	lines
}

/// Trims whitespace and control characters, e.g. the DOS end of file marker.
pub fn trim(text: &str) -> &str {
	text.trim_matches(|c: char| c.is_whitespace() || c.is_control())
}
