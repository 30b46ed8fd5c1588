// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Document stores reached through a native driver.
//!
//! A native driver cursor accepts `filter`, `sort`, `limit` and `project`,
//! but applies them in that fixed order whatever order they were called in.
//! [`DocumentCursor`] therefore pushes a pipeline step down to the driver,
//! as soon as it is appended, only while the steps so far still read in that
//! order. Everything from the first step that does not is run in memory
//! over the materialized documents.

mod cursor;
mod native;
mod planner;
mod provider;
pub mod store;

pub use cursor::DocumentCursor;
pub use native::{NativeCollection, NativeCursor, NativeDatabase, SortKey};
pub use planner::{Phase, Planner, Pushdown};
pub use provider::DocumentProvider;
pub use store::{DocumentCollection, DocumentStore};
