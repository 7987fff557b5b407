// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Decoder for saved query views of the legacy desktop database.
//!
//! A view file is line text in a single byte codepage. Decoding reads its
//! head, splits it into sections, binds every referenced field to the column
//! catalog of its table and returns a typed [`ViewSchema`]. A file that is not
//! a view, or a view that ends early, is a negative result on the schema and
//! never an error.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod batch;
mod codepage;
mod config;
mod decode;
pub mod emit;
mod explain;
mod expression;
mod lines;
mod resolve;
mod schema;
pub mod section;
pub mod token;

pub use batch::ViewOutcome;
pub use codepage::Codepage;
pub use config::{BatchErrorPolicy, DEFAULT_READ_LIMIT, DecodeConfig};
pub use decode::{ViewDecoder, decode_view};
pub use explain::{explain_field, explain_view};
pub use expression::{ExpressionClause, parse_expression};
pub use lines::split_lines;
pub use resolve::{FALLBACK_TYPE, Resolver, Section, table_key};
pub use schema::{Termination, ViewSchema};
