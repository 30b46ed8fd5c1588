// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use indexmap::IndexMap;
use jsql_algebra::Query;
use jsql_type::{Error, Record, Result};
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::debug;

use crate::{Cursor, MemoryCursor, MemorySource, Operation, ProviderConfig};

/// Hands out cursors bound to one physical source.
///
/// Providers own whatever connections they need; `open` and `close` bracket
/// their lifetime. `select` does no I/O: the query becomes the first
/// operation of the returned cursor's pipeline.
#[async_trait]
pub trait Provider: Send + Sync {
	fn name(&self) -> &'static str;

	async fn open(&self) -> Result<()> {
		Ok(())
	}

	async fn close(&self) -> Result<()> {
		Ok(())
	}

	fn select(&self, collection: &str, query: Query) -> Result<Box<dyn Cursor>>;
}

/// Seeds `cursor` with `query` unless it is empty.
pub fn seed(cursor: &mut dyn Cursor, query: Query) {
	if !query.is_empty() {
		cursor.push(Operation::Select(query));
	}
}

/// Named in-process collections.
#[derive(Debug, Default)]
pub struct MemoryProvider {
	collections: RwLock<IndexMap<String, MemorySource>>,
}

#[derive(Debug, Default, Deserialize)]
struct MemoryOptions {
	#[serde(default)]
	collections: IndexMap<String, Vec<Record>>,
}

impl MemoryProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reads seed collections from `options.collections`, a map of
	/// collection name to an array of records.
	pub fn from_config(config: &ProviderConfig) -> Result<Self> {
		let options: MemoryOptions = config.decode()?;
		let provider = Self::new();
		for (name, rows) in options.collections {
			provider.create(name, rows);
		}
		Ok(provider)
	}

	pub fn with_collection(self, name: impl Into<String>, rows: Vec<Record>) -> Self {
		self.create(name, rows);
		self
	}

	/// Creates or replaces a collection.
	pub fn create(&self, name: impl Into<String>, rows: Vec<Record>) -> MemorySource {
		let source = MemorySource::new(rows);
		self.collections.write().insert(name.into(), source.clone());
		source
	}

	pub fn collection(&self, name: &str) -> Option<MemorySource> {
		self.collections.read().get(name).cloned()
	}

	pub fn insert(&self, collection: &str, record: Record) -> Result<()> {
		let source = self.collection(collection).ok_or_else(|| Error::UnknownCollection(collection.to_string()))?;
		source.insert(record);
		Ok(())
	}
}

#[async_trait]
impl Provider for MemoryProvider {
	fn name(&self) -> &'static str {
		"memory"
	}

	fn select(&self, collection: &str, query: Query) -> Result<Box<dyn Cursor>> {
		let source = self.collection(collection).ok_or_else(|| Error::UnknownCollection(collection.to_string()))?;
		debug!(collection, rows = source.len(), "memory select");

		let mut cursor = MemoryCursor::named(collection, source);
		seed(&mut cursor, query);
		Ok(Box::new(cursor))
	}
}
