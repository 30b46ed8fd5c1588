// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite behind the relational cursor.
//!
//! Statements run on a small pool of rusqlite connections inside
//! `spawn_blocking`. A fetch abandoned by cancellation or timeout interrupts
//! the statement it was waiting on.

mod config;
mod connection;
mod convert;
mod pool;
mod provider;

pub use config::{DbPath, OpenFlags, SqliteConfig};
pub use pool::{PooledConnection, SqlitePool};
pub use provider::SqliteProvider;
