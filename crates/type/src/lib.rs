// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Plain data shared by every cursor backend: values, records, fetch output
//! and the error taxonomy.

pub mod data;
pub mod error;
pub mod record;
pub mod value;

pub use data::Data;
pub use error::{Error, Result, Stage};
pub use record::{IDENTITY_FIELDS, Record, identity};
pub use value::Value;
