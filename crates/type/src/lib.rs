// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Field descriptors and storage types shared by the pxdb crates.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod column;
mod error;
mod field;
mod field_type;

pub use column::Column;
pub use error::Error;
pub use field::{Field, LARGE_OBJECT_HEADER};
pub use field_type::{FieldType, SqlType};

pub type Result<T> = std::result::Result<T, Error>;
