// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs::File,
	io::Read,
	path::{Path, PathBuf},
};

use pxdb_catalog::FieldCatalog;
use pxdb_type::{Error, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, instrument, warn};

use crate::{
	DecodeConfig, Termination, ViewSchema,
	lines::split_lines,
	resolve::{Resolver, Section},
	section::decode_sections,
};

/// Decodes view files against a field catalog.
pub struct ViewDecoder<C> {
	catalog: C,
	config: DecodeConfig,
	pub(crate) pool: Option<ThreadPool>,
}

impl<C: FieldCatalog> ViewDecoder<C> {
	/// A dedicated pool is built when `config.threads` is set; if that fails
	/// the global pool is used.
	pub fn new(catalog: C, config: DecodeConfig) -> Self {
		let pool = config.threads.and_then(|threads| {
			match ThreadPoolBuilder::new().num_threads(threads).thread_name(|i| format!("view-decode-{i}")).build()
			{
				Ok(pool) => Some(pool),
				Err(err) => {
					warn!(threads, %err, "cannot build decode pool, using the global pool");
					None
				}
			}
		});

		Self {
			catalog,
			config,
			pool,
		}
	}

	pub fn config(&self) -> &DecodeConfig {
		&self.config
	}

	/// Reads the head of `path` and decodes it. A file that is not a view is
	/// not an error; it yields an invalid schema.
	#[instrument(name = "view::decode", level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
	pub fn decode(&self, path: impl AsRef<Path>) -> Result<ViewSchema> {
		let path = path.as_ref();
		let bytes = read_head(path, self.config.read_limit)?;
		self.decode_bytes(path, &bytes)
	}

	pub fn decode_bytes(&self, path: &Path, bytes: &[u8]) -> Result<ViewSchema> {
		let text = self.config.codepage.decode(path, bytes)?;
		self.decode_text(path, &text)
	}

	/// Decodes already decoded view text; `path` only names the result.
	pub fn decode_text(&self, path: &Path, text: &str) -> Result<ViewSchema> {
		let lines = split_lines(text);
		let raw = decode_sections(&lines)?;

		let mut result = ViewSchema::new(path, raw.termination);
		if raw.termination == Termination::NotAView {
			debug!("not a view");
			return Ok(result);
		}

		let resolver = Resolver::new(&self.catalog);
		result.field_order = resolver.resolve_section(Section::FieldOrder, &raw.field_order)?;
		result.sort_fields = resolver.resolve_section(Section::Sort, &raw.sort)?;
		for block in &raw.blocks {
			let fields = resolver.resolve_block(block, result.projected_fields.len() + 1)?;
			result.projected_fields.extend(fields);
		}

		debug!(
			termination = %result.termination,
			field_order = result.field_order.len(),
			sort = result.sort_fields.len(),
			projected = result.projected_fields.len(),
			"decoded view"
		);
		Ok(result)
	}
}

/// Decodes a single view file without a dedicated pool.
pub fn decode_view(path: impl AsRef<Path>, catalog: &dyn FieldCatalog, config: &DecodeConfig) -> Result<ViewSchema> {
	ViewDecoder {
		catalog,
		config: config.clone(),
		pool: None,
	}
	.decode(path)
}

fn read_head(path: &Path, limit: usize) -> Result<Vec<u8>> {
	let io_error = |source| Error::Io {
		path: PathBuf::from(path),
		source,
	};

	let file = File::open(path).map_err(io_error)?;
	let mut result = Vec::with_capacity(limit.min(64 * 1024));
	file.take(limit as u64).read_to_end(&mut result).map_err(io_error)?;
	Ok(result)
}
