// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use jsql_type::{Data, Result};
use uuid::Uuid;

use crate::{FetchOptions, MemoryCursor, Operation, Pipeline, Schema};

/// Identifies a cursor; copies remember the id of the cursor they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorId(Uuid);

impl CursorId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for CursorId {
	fn default() -> Self {
		Self::new()
	}
}

impl Display for CursorId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Bookkeeping every cursor carries, whatever its backend.
#[derive(Debug, Default)]
pub struct CursorState {
	pub id: CursorId,
	pub parent: Option<CursorId>,
	pub collection: Option<String>,
	pub schema: Option<Schema>,
	pub pipeline: Pipeline,
}

impl CursorState {
	pub fn new(collection: Option<String>) -> Self {
		Self {
			collection,
			..Self::default()
		}
	}

	/// State for a cursor derived from this one: same collection and
	/// schema, fresh id and an empty pipeline.
	pub fn derive(&self) -> Self {
		Self {
			id: CursorId::new(),
			parent: Some(self.id),
			collection: self.collection.clone(),
			schema: self.schema.clone(),
			pipeline: Pipeline::new(),
		}
	}
}

/// A lazily evaluated query against one collection.
///
/// Builder calls (see [`CursorBuilder`](crate::CursorBuilder)) only append
/// to the pipeline. [`fetch`](Cursor::fetch) takes the pipeline, leaving it
/// empty, and executes it against the cursor's original source. A second
/// fetch therefore sees an empty pipeline, never a half-drained one.
#[async_trait]
pub trait Cursor: Send + Sync {
	/// Short backend name, used in logs and errors.
	fn backend(&self) -> &'static str;

	fn state(&self) -> &CursorState;

	fn state_mut(&mut self) -> &mut CursorState;

	/// Records one operation. Backends that push work down while the
	/// pipeline is being built override this.
	fn push(&mut self, operation: Operation) {
		self.state_mut().pipeline.push(operation);
	}

	/// A new cursor over the same source, sharing its records.
	fn copy(&self) -> Box<dyn Cursor>;

	async fn fetch_with(&mut self, options: FetchOptions) -> Result<Data>;

	async fn fetch(&mut self) -> Result<Data> {
		self.fetch_with(FetchOptions::default()).await
	}

	/// Fetches the rows and continues in memory, for client-side work (set
	/// algebra in particular) against another backend's results.
	async fn select_to_memory(&mut self) -> Result<MemoryCursor> {
		let rows = self.fetch().await?.into_rows("select_to_memory")?;
		let mut state = self.state().derive();
		state.collection = None;
		Ok(MemoryCursor::with_state(state, rows))
	}

	fn id(&self) -> CursorId {
		self.state().id
	}

	fn parent(&self) -> Option<CursorId> {
		self.state().parent
	}

	fn collection(&self) -> Option<&str> {
		self.state().collection.as_deref()
	}

	fn pipeline(&self) -> &Pipeline {
		&self.state().pipeline
	}

	fn schema(&self) -> Option<&Schema> {
		self.state().schema.as_ref()
	}

	fn bind_schema(&mut self, schema: Schema) {
		self.state_mut().schema = Some(schema);
	}
}
