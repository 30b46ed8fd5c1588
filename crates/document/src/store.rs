// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! An in-process document store speaking the native driver interface.
//!
//! Like a real driver it ignores call order: `to_array` always filters,
//! then sorts, then limits, then projects.

use std::{cmp::Ordering, sync::Arc, time::Duration};

use async_trait::async_trait;
use indexmap::IndexMap;
use jsql_algebra::{Direction, FieldConstraints, Projection, order::compare_fields, project};
use jsql_type::{Error, Record, Result};
use parking_lot::RwLock;

use crate::{NativeCollection, NativeCursor, NativeDatabase, SortKey};

#[derive(Debug, Default)]
pub struct DocumentStore {
	collections: RwLock<IndexMap<String, Arc<DocumentCollection>>>,
}

impl DocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// The named collection, created empty on first use.
	pub fn create(&self, name: &str) -> Arc<DocumentCollection> {
		self.collections.write().entry(name.to_string()).or_default().clone()
	}

	pub fn with_collection(self, name: &str, documents: Vec<Record>) -> Self {
		self.create(name).insert_many(documents);
		self
	}
}

impl NativeDatabase for DocumentStore {
	fn collection(&self, name: &str) -> Result<Arc<dyn NativeCollection>> {
		match self.collections.read().get(name) {
			Some(collection) => Ok(collection.clone()),
			None => Err(Error::UnknownCollection(name.to_string())),
		}
	}
}

#[derive(Debug, Default)]
pub struct DocumentCollection {
	documents: Arc<RwLock<Vec<Record>>>,
	latency: RwLock<Option<Duration>>,
}

impl DocumentCollection {
	pub fn insert(&self, document: Record) {
		self.documents.write().push(document);
	}

	pub fn insert_many(&self, documents: impl IntoIterator<Item = Record>) {
		self.documents.write().extend(documents);
	}

	pub fn len(&self) -> usize {
		self.documents.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.read().is_empty()
	}

	/// Delays every `to_array`, standing in for a slow round trip.
	pub fn set_latency(&self, latency: Option<Duration>) {
		*self.latency.write() = latency;
	}
}

impl NativeCollection for DocumentCollection {
	fn find(&self) -> Box<dyn NativeCursor> {
		Box::new(StoreCursor {
			documents: self.documents.clone(),
			latency: *self.latency.read(),
			filters: Vec::new(),
			sort: Vec::new(),
			limit: None,
			projection: None,
		})
	}
}

struct StoreCursor {
	documents: Arc<RwLock<Vec<Record>>>,
	latency: Option<Duration>,
	filters: Vec<FieldConstraints>,
	sort: Vec<SortKey>,
	limit: Option<usize>,
	projection: Option<Vec<String>>,
}

#[async_trait]
impl NativeCursor for StoreCursor {
	fn filter(&mut self, constraints: Vec<FieldConstraints>) {
		self.filters.extend(constraints);
	}

	fn sort(&mut self, keys: Vec<SortKey>) {
		self.sort = keys;
	}

	fn limit(&mut self, n: usize) {
		self.limit = Some(n);
	}

	fn project(&mut self, fields: Vec<String>) {
		self.projection = Some(fields);
	}

	async fn to_array(&mut self) -> Result<Vec<Record>> {
		if let Some(latency) = self.latency {
			tokio::time::sleep(latency).await;
		}

		let mut documents: Vec<Record> = self
			.documents
			.read()
			.iter()
			.filter(|document| self.filters.iter().all(|filter| filter.matches(document)))
			.cloned()
			.collect();

		if !self.sort.is_empty() {
			documents.sort_by(|left, right| compare(&self.sort, left, right));
		}
		if let Some(limit) = self.limit {
			documents.truncate(limit);
		}
		if let Some(fields) = &self.projection {
			documents = project(&Projection::Fields(fields.clone()), documents);
		}
		Ok(documents)
	}
}

fn compare(keys: &[SortKey], left: &Record, right: &Record) -> Ordering {
	keys.iter()
		.map(|(field, direction)| {
			let ordering = compare_fields(std::slice::from_ref(field), left, right);
			match direction {
				Direction::Asc => ordering,
				Direction::Desc => ordering.reverse(),
			}
		})
		.find(|ordering| ordering.is_ne())
		.unwrap_or(Ordering::Equal)
}
