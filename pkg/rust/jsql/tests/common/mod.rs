// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use std::sync::Arc;

use jsql::{
	Cursor, Data, DocumentProvider, LoopbackChannel, MemoryProvider, Provider, Query, Record, RemoteProvider,
	RemoteService, SqliteConfig, SqliteProvider, document::DocumentStore,
};

pub const COLLECTION: &str = "ds";

/// The same rows served by every backend. The remote provider talks to a
/// SQLite peer over the loopback channel.
pub struct Backends {
	pub providers: Vec<Box<dyn Provider>>,
}

impl Backends {
	pub async fn new(rows: Vec<Record>) -> Self {
		let memory = MemoryProvider::new().with_collection(COLLECTION, rows.clone());
		let document = DocumentProvider::new(Arc::new(DocumentStore::new().with_collection(COLLECTION, rows.clone())));
		let local = sqlite(rows.clone()).await;

		let peer: Arc<dyn Provider> = Arc::new(sqlite(rows).await);
		let channel = Arc::new(LoopbackChannel::new(Arc::new(RemoteService::new(peer))));
		let remote = RemoteProvider::new(channel);

		Self {
			providers: vec![Box::new(memory), Box::new(local), Box::new(document), Box::new(remote)],
		}
	}

	pub fn cursors(&self) -> Vec<Box<dyn Cursor>> {
		self.providers.iter().map(|provider| provider.select(COLLECTION, Query::new()).unwrap()).collect()
	}

	/// Builds the same pipeline on every backend and fetches it. The first
	/// entry is the in-memory reference.
	pub async fn fetch_all(&self, build: impl Fn(&mut dyn Cursor)) -> Vec<(&'static str, jsql::Result<Data>)> {
		let mut result = Vec::new();
		for mut cursor in self.cursors() {
			build(cursor.as_mut());
			let backend = cursor.backend();
			result.push((backend, cursor.fetch().await));
		}
		result
	}

	/// Asserts every backend returns exactly `expected`.
	pub async fn assert_all(&self, expected: Data, build: impl Fn(&mut dyn Cursor)) {
		for (backend, data) in self.fetch_all(build).await {
			assert_eq!(data.unwrap(), expected, "backend {backend}");
		}
	}
}

async fn sqlite(rows: Vec<Record>) -> SqliteProvider {
	let provider = SqliteProvider::new(SqliteConfig::in_memory());
	provider.open().await.unwrap();
	provider.load(COLLECTION, rows).await.unwrap();
	provider
}

/// Compares rows ignoring order.
pub fn same_rows(left: &Data, right: &Data) -> bool {
	match (left.rows(), right.rows()) {
		(Some(left), Some(right)) => {
			left.len() == right.len() && left.iter().all(|row| {
				left.iter().filter(|r| *r == row).count() == right.iter().filter(|r| *r == row).count()
			})
		}
		_ => left == right,
	}
}
