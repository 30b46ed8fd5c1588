// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use jsql_type::{Record, Result};

use crate::Query;

/// An opaque record predicate. No backend can push one down.
pub type Predicate = Arc<dyn Fn(&Record) -> bool + Send + Sync>;

/// Keeps the records matching every constraint of every field in `query`.
pub fn select(query: &Query, rows: Vec<Record>) -> Result<Vec<Record>> {
	let compiled = query.compile()?;
	Ok(rows.into_iter().filter(|record| compiled.iter().all(|field| field.matches(record))).collect())
}

pub fn filter(predicate: &Predicate, rows: Vec<Record>) -> Vec<Record> {
	rows.into_iter().filter(|record| predicate(record)).collect()
}

/// Keeps the first record matching `predicate`, if any.
pub fn find(predicate: &Predicate, rows: Vec<Record>) -> Vec<Record> {
	rows.into_iter().find(|record| predicate(record)).into_iter().collect()
}
