// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_core::{Cursor, CursorState, FetchOptions, continuation};
use jsql_type::{Data, Record, Result, Stage, Value};
use tracing::{debug, instrument};

use crate::{
	CompilerOptions, Output, SqlConnection,
	compiler::{SCALAR_COLUMN, compile},
};

/// A cursor over one table behind a [`SqlConnection`].
///
/// Fetch compiles the translatable prefix into one statement and finishes
/// the rest of the pipeline in memory over the returned rows.
pub struct RelationalCursor {
	state: CursorState,
	connection: Arc<dyn SqlConnection>,
	options: CompilerOptions,
}

impl RelationalCursor {
	pub fn new(table: impl Into<String>, connection: Arc<dyn SqlConnection>) -> Self {
		let options = CompilerOptions::new(connection.dialect());
		Self {
			state: CursorState::new(Some(table.into())),
			connection,
			options,
		}
	}

	pub fn with_options(mut self, options: CompilerOptions) -> Self {
		self.options = options;
		self
	}

	pub fn options(&self) -> &CompilerOptions {
		&self.options
	}
}

#[async_trait]
impl Cursor for RelationalCursor {
	fn backend(&self) -> &'static str {
		"sql"
	}

	fn state(&self) -> &CursorState {
		&self.state
	}

	fn state_mut(&mut self) -> &mut CursorState {
		&mut self.state
	}

	fn copy(&self) -> Box<dyn Cursor> {
		Box::new(RelationalCursor {
			state: self.state.derive(),
			connection: self.connection.clone(),
			options: self.options.clone(),
		})
	}

	#[instrument(
		name = "cursor::sql::fetch",
		level = "debug",
		skip(self, options),
		fields(collection = ?self.state.collection, steps = self.state.pipeline.len())
	)]
	async fn fetch_with(&mut self, options: FetchOptions) -> Result<Data> {
		let mut operations = self.state.pipeline.take();
		let context = options.start();

		let compiled = compile(self.state.collection.as_deref(), &operations, &self.options)?;
		let rows = context.guard(Stage::Pushdown, self.connection.query(&compiled.sql, &compiled.params)).await?;
		debug!(rows = rows.len(), "statement returned");

		let data = match compiled.output {
			Output::Rows => Data::Rows(rows),
			Output::Scalar => Data::Values(vec![scalar(rows)]),
		};

		let remaining = operations.split_off(compiled.consumed);
		if remaining.is_empty() {
			return Ok(data);
		}
		context.guard(Stage::Continuation, continuation::run(remaining, data, &context)).await
	}
}

fn scalar(rows: Vec<Record>) -> Value {
	rows.into_iter().next().and_then(|mut row| row.swap_remove(SCALAR_COLUMN)).unwrap_or(Value::Undefined)
}
