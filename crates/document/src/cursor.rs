// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{mem, sync::Arc};

use async_trait::async_trait;
use jsql_core::{Cursor, CursorState, FetchOptions, Operation, continuation};
use jsql_type::{Data, Result, Stage};
use tracing::{debug, instrument, trace};

use crate::{NativeCollection, NativeCursor, Planner, Pushdown};

/// A cursor over one collection of a document store.
///
/// Steps are handed to the driver cursor eagerly, while they are appended.
/// The pipeline still records every step, so fetch knows where the pushed
/// prefix ends and the in-memory continuation begins.
pub struct DocumentCursor {
	state: CursorState,
	collection: Arc<dyn NativeCollection>,
	native: Box<dyn NativeCursor>,
	planner: Planner,
}

impl DocumentCursor {
	pub fn new(name: impl Into<String>, collection: Arc<dyn NativeCollection>) -> Self {
		Self::with_state(CursorState::new(Some(name.into())), collection)
	}

	fn with_state(state: CursorState, collection: Arc<dyn NativeCollection>) -> Self {
		let native = collection.find();
		Self {
			state,
			collection,
			native,
			planner: Planner::new(),
		}
	}

	/// Number of pending steps already handed to the driver.
	pub fn pushed(&self) -> usize {
		self.planner.pushed()
	}

	/// Starts the next batch on a fresh driver cursor.
	fn reset(&mut self) -> Box<dyn NativeCursor> {
		self.planner = Planner::new();
		mem::replace(&mut self.native, self.collection.find())
	}
}

#[async_trait]
impl Cursor for DocumentCursor {
	fn backend(&self) -> &'static str {
		"document"
	}

	fn state(&self) -> &CursorState {
		&self.state
	}

	fn state_mut(&mut self) -> &mut CursorState {
		&mut self.state
	}

	fn push(&mut self, operation: Operation) {
		if let Some(pushdown) = self.planner.plan(&operation) {
			trace!(operation = operation.name(), "pushed to driver");
			match pushdown {
				Pushdown::Filter(constraints) => self.native.filter(constraints),
				Pushdown::Sort(keys) => self.native.sort(keys),
				Pushdown::Limit(n) => self.native.limit(n),
				Pushdown::Project(fields) => self.native.project(fields),
			}
		}
		self.state.pipeline.push(operation);
	}

	fn copy(&self) -> Box<dyn Cursor> {
		Box::new(DocumentCursor::with_state(self.state.derive(), self.collection.clone()))
	}

	#[instrument(
		name = "cursor::document::fetch",
		level = "debug",
		skip(self, options),
		fields(collection = ?self.state.collection, steps = self.state.pipeline.len(), pushed = self.planner.pushed())
	)]
	async fn fetch_with(&mut self, options: FetchOptions) -> Result<Data> {
		let pushed = self.planner.pushed();
		let mut operations = self.state.pipeline.take();
		let mut native = self.reset();
		let context = options.start();

		// a condition that does not parse fails the fetch before the driver
		// is asked for anything
		for operation in &operations {
			if let Operation::Select(query) = operation {
				query.compile()?;
			}
		}

		let rows = context.guard(Stage::Pushdown, native.to_array()).await?;
		debug!(rows = rows.len(), "driver returned");

		let remaining = operations.split_off(pushed);
		if remaining.is_empty() {
			return Ok(Data::Rows(rows));
		}
		context.guard(Stage::Continuation, continuation::run(remaining, Data::Rows(rows), &context)).await
	}
}
