// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, fs, io, path::Path};

use uuid::Uuid;

/// Runs `f` with a fresh empty directory that is removed afterwards, whether
/// `f` succeeds or not.
pub fn temp_dir<F, T>(f: F) -> io::Result<T>
where
	F: FnOnce(&Path) -> io::Result<T>,
{
	let path = env::temp_dir().join(format!("pxdb-{}", Uuid::new_v4()));

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}
