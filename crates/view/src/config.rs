// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::Codepage;

/// Bytes read from the head of a view file. The definition is a short text
/// header; anything after it is irrelevant to the schema.
pub const DEFAULT_READ_LIMIT: usize = 8 * 1024;

/// What a batch does when one file fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchErrorPolicy {
	/// Log the failure, keep decoding the other files.
	#[default]
	Skip,
	/// Fail the batch with the failure of the earliest file.
	Abort,
}

/// Configuration of a [`crate::ViewDecoder`].
#[derive(Debug, Clone)]
pub struct DecodeConfig {
	pub codepage: Codepage,
	pub read_limit: usize,
	pub on_error: BatchErrorPolicy,
	/// Size of a dedicated pool for batch decoding. `None` uses the global pool.
	pub threads: Option<usize>,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			codepage: Codepage::default(),
			read_limit: DEFAULT_READ_LIMIT,
			on_error: BatchErrorPolicy::default(),
			threads: None,
		}
	}
}

impl DecodeConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn codepage(mut self, codepage: Codepage) -> Self {
		self.codepage = codepage;
		self
	}

	pub fn read_limit(mut self, bytes: usize) -> Self {
		self.read_limit = bytes;
		self
	}

	pub fn on_error(mut self, policy: BatchErrorPolicy) -> Self {
		self.on_error = policy;
		self
	}

	pub fn threads(mut self, count: usize) -> Self {
		self.threads = Some(count);
		self
	}
}
