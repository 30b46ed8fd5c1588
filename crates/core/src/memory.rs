// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_type::{Data, Record, Result, Stage};
use parking_lot::RwLock;
use tracing::instrument;

use crate::{Cursor, CursorState, FetchOptions, continuation};

/// Records resident in process, shared by every cursor copied from the same
/// source.
#[derive(Clone, Debug, Default)]
pub struct MemorySource(Arc<RwLock<Vec<Record>>>);

impl MemorySource {
	pub fn new(rows: Vec<Record>) -> Self {
		Self(Arc::new(RwLock::new(rows)))
	}

	/// The rows as they are now. Fetch works on a snapshot so writers are
	/// never blocked for the duration of a pipeline.
	pub fn snapshot(&self) -> Vec<Record> {
		self.0.read().clone()
	}

	pub fn insert(&self, record: Record) {
		self.0.write().push(record);
	}

	pub fn extend(&self, records: impl IntoIterator<Item = Record>) {
		self.0.write().extend(records);
	}

	/// Runs `f` with write access to the rows.
	pub fn write<R>(&self, f: impl FnOnce(&mut Vec<Record>) -> R) -> R {
		f(&mut self.0.write())
	}

	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Whether both handles point at the same rows.
	pub fn same(&self, other: &MemorySource) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

/// Executes the whole pipeline in process. Every other cursor is expected to
/// return what this one returns.
#[derive(Debug)]
pub struct MemoryCursor {
	state: CursorState,
	source: MemorySource,
}

impl MemoryCursor {
	pub fn new(rows: Vec<Record>) -> Self {
		Self::with_state(CursorState::default(), rows)
	}

	pub fn named(collection: impl Into<String>, source: MemorySource) -> Self {
		Self {
			state: CursorState::new(Some(collection.into())),
			source,
		}
	}

	pub fn with_state(state: CursorState, rows: Vec<Record>) -> Self {
		Self {
			state,
			source: MemorySource::new(rows),
		}
	}

	pub fn source(&self) -> &MemorySource {
		&self.source
	}

	/// A cursor over an independent copy of the rows. Later writes through
	/// either cursor's source are invisible to the other.
	pub fn deep_clone(&self) -> MemoryCursor {
		MemoryCursor {
			state: self.state.derive(),
			source: MemorySource::new(self.source.snapshot()),
		}
	}

	/// Like [`Cursor::copy`], keeping the concrete type.
	pub fn copy_memory(&self) -> MemoryCursor {
		MemoryCursor {
			state: self.state.derive(),
			source: self.source.clone(),
		}
	}
}

#[async_trait]
impl Cursor for MemoryCursor {
	fn backend(&self) -> &'static str {
		"memory"
	}

	fn state(&self) -> &CursorState {
		&self.state
	}

	fn state_mut(&mut self) -> &mut CursorState {
		&mut self.state
	}

	fn copy(&self) -> Box<dyn Cursor> {
		Box::new(self.copy_memory())
	}

	#[instrument(
		name = "cursor::memory::fetch",
		level = "debug",
		skip(self, options),
		fields(collection = ?self.state.collection, steps = self.state.pipeline.len())
	)]
	async fn fetch_with(&mut self, options: FetchOptions) -> Result<Data> {
		let operations = self.state.pipeline.take();
		let context = options.start();
		let rows = self.source.snapshot();
		context.guard(Stage::Continuation, continuation::run(operations, Data::Rows(rows), &context)).await
	}
}
