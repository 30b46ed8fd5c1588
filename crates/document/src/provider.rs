// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_algebra::Query;
use jsql_core::{Cursor, Provider, provider::seed};
use jsql_type::Result;
use tracing::debug;

use crate::{DocumentCursor, NativeDatabase};

/// Serves cursors over the collections of a native document database.
pub struct DocumentProvider {
	database: Arc<dyn NativeDatabase>,
}

impl DocumentProvider {
	pub fn new(database: Arc<dyn NativeDatabase>) -> Self {
		Self {
			database,
		}
	}
}

#[async_trait]
impl Provider for DocumentProvider {
	fn name(&self) -> &'static str {
		"document"
	}

	fn select(&self, collection: &str, query: Query) -> Result<Box<dyn Cursor>> {
		let native = self.database.collection(collection)?;
		debug!(collection, "document select");

		let mut cursor = DocumentCursor::new(collection, native);
		seed(&mut cursor, query);
		Ok(Box::new(cursor))
	}
}
