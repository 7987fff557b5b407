// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod catalog;

use std::{io, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use pxdb_catalog::MemoryCatalog;
use pxdb_view::{BatchErrorPolicy, DEFAULT_READ_LIMIT, DecodeConfig, ViewDecoder, ViewSchema, emit, explain_view};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
	#[error("cannot read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("invalid catalog {}: {source}", path.display())]
	Catalog {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error(transparent)]
	Decode(#[from] pxdb_type::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
	/// Line oriented description
	Text,
	/// Decoded schemas as JSON
	Json,
	/// One SELECT statement per view
	Sql,
}

#[derive(Parser, Debug)]
#[command(name = "pxdb")]
#[command(version)]
#[command(about = "Decode legacy saved view files into typed schemas")]
struct Args {
	/// Catalog snapshot with the fields of every table (JSON)
	#[arg(short, long, value_name = "FILE")]
	catalog: PathBuf,

	/// Bytes read from the head of each view file
	#[arg(long, value_name = "BYTES", default_value_t = DEFAULT_READ_LIMIT)]
	read_limit: usize,

	/// Stop at the first file that fails to decode
	#[arg(long)]
	abort_on_error: bool,

	/// Worker threads for decoding several files
	#[arg(long)]
	threads: Option<usize>,

	/// Only report files that are complete views
	#[arg(long)]
	list: bool,

	#[arg(long, value_enum, default_value_t = Format::Text)]
	format: Format,

	/// Log filter used when RUST_LOG is not set
	#[arg(long, default_value = "warn")]
	log_level: String,

	/// View files to decode
	#[arg(required = true, value_name = "FILE")]
	files: Vec<PathBuf>,
}

impl Args {
	fn config(&self) -> DecodeConfig {
		let mut result = DecodeConfig::new().read_limit(self.read_limit);
		if self.abort_on_error {
			result = result.on_error(BatchErrorPolicy::Abort);
		}
		if let Some(threads) = self.threads {
			result = result.threads(threads);
		}
		result
	}
}

fn main() -> ExitCode {
	let args = Args::parse();
	init_tracing(&args.log_level);

	match run(&args) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(err) => {
			error!(%err, "decoding failed");
			eprintln!("error: {err}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

/// Prints the decoded views; `false` when some file failed.
fn run(args: &Args) -> Result<bool, CliError> {
	let catalog: MemoryCatalog = catalog::load(&args.catalog)?;
	let decoder = ViewDecoder::new(catalog, args.config());
	info!(files = args.files.len(), "decoding views");

	let mut views = Vec::new();
	let mut failed = 0;
	for outcome in decoder.decode_all(&args.files)? {
		match outcome.result {
			Ok(schema) if args.list && !schema.is_valid => {}
			Ok(schema) => views.push(schema),
			Err(err) => {
				eprintln!("{}: {err}", outcome.path.display());
				failed += 1;
			}
		}
	}

	println!("{}", render(&views, args.format)?);
	Ok(failed == 0)
}

fn render(views: &[ViewSchema], format: Format) -> Result<String, CliError> {
	Ok(match format {
		Format::Text => views.iter().map(explain_view).collect::<Vec<_>>().join("\n"),
		Format::Json => serde_json::to_string_pretty(views)?,
		Format::Sql => views
			.iter()
			.filter(|view| view.is_valid)
			.map(|view| format!("-- {}\n{};", view.display_name, emit::select(view)))
			.collect::<Vec<_>>()
			.join("\n"),
	})
}

#[cfg(test)]
mod tests {
	use std::{fs, path::Path};

	use pxdb_testing::tempdir::temp_dir;
	use pxdb_view::{Codepage, Termination};

	use super::*;

	#[test]
	fn test_args() {
		let args = Args::try_parse_from([
			"pxdb",
			"--catalog",
			"catalog.json",
			"--abort-on-error",
			"--threads",
			"4",
			"--format",
			"sql",
			"A.QBE",
			"B.QBE",
		])
		.unwrap();

		assert_eq!(args.format, Format::Sql);
		assert_eq!(args.files.len(), 2);

		let config = args.config();
		assert_eq!(config.on_error, BatchErrorPolicy::Abort);
		assert_eq!(config.threads, Some(4));
		assert_eq!(config.read_limit, DEFAULT_READ_LIMIT);
	}

	#[test]
	fn test_args_require_files() {
		assert!(Args::try_parse_from(["pxdb", "--catalog", "catalog.json"]).is_err());
	}

	fn write_inputs(dir: &Path) -> io::Result<Vec<String>> {
		let catalog = dir.join("catalog.json");
		fs::write(&catalog, r#"{"tables":[{"name":"CUSTOMER","fields":[{"name":"Name","type":1,"size":30}]}]}"#)?;

		let codepage = Codepage::default();
		let good = dir.join("GOOD.QBE");
		fs::write(&good, codepage.encode("Query\r\nANSWER\r\n\r\nCUSTOMER.DB | Name |\r\n| Check |\r\n\r\nEndQuery\r\n"))?;
		let bad = dir.join("BAD.QBE");
		fs::write(&bad, codepage.encode("Query\r\nANSWER\r\n\r\nVENDORS.DB | Name |\r\n| Check |\r\n\r\nEndQuery\r\n"))?;

		Ok([catalog, good, bad].iter().map(|path| path.display().to_string()).collect())
	}

	#[test]
	fn test_failed_file_fails_the_run() {
		temp_dir(|dir| {
			let inputs = write_inputs(dir)?;
			let [catalog, good, bad] = [inputs[0].as_str(), inputs[1].as_str(), inputs[2].as_str()];

			let args = Args::try_parse_from(["pxdb", "--catalog", catalog, good, bad]).unwrap();
			assert!(!run(&args).unwrap());

			let args = Args::try_parse_from(["pxdb", "--list", "--catalog", catalog, good, bad]).unwrap();
			assert!(!run(&args).unwrap());

			let args = Args::try_parse_from(["pxdb", "--list", "--catalog", catalog, good]).unwrap();
			assert!(run(&args).unwrap());

			let args = Args::try_parse_from(["pxdb", "--abort-on-error", "--catalog", catalog, good, bad]).unwrap();
			assert!(matches!(run(&args), Err(CliError::Decode(_))));
			Ok(())
		})
		.unwrap();
	}

	#[test]
	fn test_render() {
		let views = vec![ViewSchema::new("A.QBE", Termination::EndQuery), ViewSchema::new("B.DB", Termination::NotAView)];

		assert_eq!(render(&views, Format::Sql).unwrap(), "-- A.QBE\nSELECT *;");
		assert!(render(&views, Format::Text).unwrap().starts_with("view A.QBE\nvalid true (end-query)\n"));

		let json: serde_json::Value = serde_json::from_str(&render(&views, Format::Json).unwrap()).unwrap();
		assert_eq!(json[1]["termination"], "not-a-view");
		assert_eq!(json[1]["is_valid"], false);
	}
}
