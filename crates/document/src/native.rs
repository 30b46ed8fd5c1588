// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_algebra::{Direction, FieldConstraints};
use jsql_type::{Record, Result};

pub type SortKey = (String, Direction);

/// A database handle of the native driver.
pub trait NativeDatabase: Send + Sync {
	fn collection(&self, name: &str) -> Result<Arc<dyn NativeCollection>>;
}

pub trait NativeCollection: Send + Sync {
	/// A fresh cursor over every document of the collection.
	fn find(&self) -> Box<dyn NativeCursor>;
}

/// A driver cursor. Calls configure it; [`to_array`](Self::to_array) runs
/// it as filter, then sort, then limit, then project.
#[async_trait]
pub trait NativeCursor: Send + Sync {
	/// Adds constraints; all filters given must hold.
	fn filter(&mut self, constraints: Vec<FieldConstraints>);

	/// Sorts by `keys`, the first key most significant.
	fn sort(&mut self, keys: Vec<SortKey>);

	fn limit(&mut self, n: usize);

	/// Keeps only `fields` of each document.
	fn project(&mut self, fields: Vec<String>);

	async fn to_array(&mut self) -> Result<Vec<Record>>;
}
