// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test helpers shared by the pxdb crates.

pub mod script;
pub mod tempdir;
