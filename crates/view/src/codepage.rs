// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Cow,
	fmt::{Debug, Formatter},
	path::Path,
};

use encoding_rs::Encoding;
use pxdb_type::{Error, Result};

/// Single byte codepage the view text was written in.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Codepage(&'static Encoding);

impl Codepage {
	/// Central European Windows codepage, the one the legacy tool writes.
	pub fn windows_1250() -> Self {
		Self(encoding_rs::WINDOWS_1250)
	}

	/// Thai Windows codepage; it leaves 0xDB..=0xDE and 0xFC..=0xFF unmapped.
	#[cfg(test)]
	pub(crate) fn with_unmapped_bytes() -> Self {
		Self(encoding_rs::WINDOWS_874)
	}

	pub fn name(&self) -> &'static str {
		self.0.name()
	}

	/// Decodes `bytes` read from `path`. Bytes the codepage cannot map fail
	/// the whole file.
	pub fn decode(&self, path: &Path, bytes: &[u8]) -> Result<String> {
		self.0.decode_without_bom_handling_and_without_replacement(bytes).map(Cow::into_owned).ok_or_else(|| {
			Error::CodepageDecode {
				path: path.to_path_buf(),
				codepage: self.name(),
			}
		})
	}

	/// Encodes `text`, replacing characters the codepage lacks.
	pub fn encode(&self, text: &str) -> Vec<u8> {
		let (bytes, _, _) = self.0.encode(text);
		bytes.into_owned()
	}
}

impl Default for Codepage {
	fn default() -> Self {
		Self::windows_1250()
	}
}

impl Debug for Codepage {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Codepage").field(&self.name()).finish()
	}
}
