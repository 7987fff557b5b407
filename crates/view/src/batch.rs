// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::{Path, PathBuf};

use pxdb_catalog::FieldCatalog;
use pxdb_type::Result;
use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::{BatchErrorPolicy, ViewDecoder, ViewSchema};

/// Result of decoding one file of a batch.
#[derive(Debug)]
pub struct ViewOutcome {
	pub path: PathBuf,
	pub result: Result<ViewSchema>,
}

impl<C: FieldCatalog> ViewDecoder<C> {
	/// Decodes `paths` in parallel, in input order. With
	/// [`BatchErrorPolicy::Skip`] failures are logged and returned per file;
	/// with [`BatchErrorPolicy::Abort`] the failure of the earliest path in
	/// `paths` is returned.
	#[instrument(name = "view::batch::decode_all", level = "debug", skip_all, fields(files = paths.len()))]
	pub fn decode_all<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<Vec<ViewOutcome>> {
		let outcomes: Vec<ViewOutcome> = self.install(|| {
			paths.par_iter()
				.map(|path| ViewOutcome {
					path: path.as_ref().to_path_buf(),
					result: self.decode(path),
				})
				.collect()
		});

		match self.config().on_error {
			BatchErrorPolicy::Skip => {
				for outcome in &outcomes {
					if let Err(err) = &outcome.result {
						warn!(path = %outcome.path.display(), file_error = err.is_file_error(), %err, "skipping view file");
					}
				}
				Ok(outcomes)
			}
			BatchErrorPolicy::Abort => outcomes
				.into_iter()
				.map(|outcome| {
					let schema = outcome.result?;
					Ok(ViewOutcome {
						path: outcome.path,
						result: Ok(schema),
					})
				})
				.collect(),
		}
	}

	/// Valid views among `paths`. Files that are not views, or stop before
	/// their definition is complete, are left out.
	pub fn list_views<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<Vec<ViewSchema>> {
		let outcomes = self.decode_all(paths)?;
		Ok(outcomes
			.into_iter()
			.filter_map(|outcome| match outcome.result {
				Ok(schema) if schema.is_valid => Some(schema),
				Ok(schema) => {
					debug!(path = %outcome.path.display(), termination = %schema.termination, "not listed");
					None
				}
				Err(_) => None,
			})
			.collect())
	}

	fn install<R: Send>(&self, f: impl FnOnce() -> R + Send) -> R {
		match &self.pool {
			Some(pool) => pool.install(f),
			None => f(),
		}
	}
}
