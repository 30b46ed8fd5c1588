// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pipeline to SQL.
//!
//! [`compile`] translates the longest pipeline prefix it can express into a
//! single `SELECT` and reports how many steps that prefix covers. The
//! [`RelationalCursor`] runs the statement through a [`SqlConnection`] and
//! hands the remaining steps to the continuation.

pub mod compiler;
pub mod connection;
pub mod cursor;
pub mod dialect;
pub mod escape;

pub use compiler::{Compiled, CompilerOptions, Output, compile};
pub use connection::SqlConnection;
pub use cursor::RelationalCursor;
pub use dialect::Dialect;
