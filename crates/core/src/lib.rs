// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Cursors and pipelines.
//!
//! A [`Cursor`] records [`Operation`]s in a [`Pipeline`] without doing any
//! I/O. The terminal [`Cursor::fetch`] drains the pipeline and executes it:
//! each backend runs as much of it as it can natively and hands the rest to
//! [`continuation::run`], which folds the dataset algebra over the rows.
//!
//! [`MemoryCursor`] runs the whole pipeline through the continuation and is
//! therefore the reference every other backend is measured against.

pub mod builder;
pub mod continuation;
pub mod cursor;
pub mod fetch;
pub mod memory;
pub mod operation;
pub mod pipeline;
pub mod provider;
pub mod registry;
pub mod schema;

pub use builder::{CursorBuilder, Fields, ProjectionArg};
pub use cursor::{Cursor, CursorId, CursorState};
pub use fetch::{CancellationToken, FetchContext, FetchOptions};
pub use memory::{MemoryCursor, MemorySource};
pub use operation::{Operand, Operation};
pub use pipeline::Pipeline;
pub use provider::{MemoryProvider, Provider};
pub use registry::{Constructor, ProviderConfig, ProviderRegistry};
pub use schema::Schema;
