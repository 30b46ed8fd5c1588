// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cmp::Ordering, sync::Arc};

use jsql_type::{Record, Value};
use serde::{Deserialize, Serialize};

/// An opaque record comparator. No backend can push one down.
pub type Comparator = Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
	Asc,
	Desc,
}

impl Direction {
	pub fn as_sql(&self) -> &'static str {
		match self {
			Direction::Asc => "ASC",
			Direction::Desc => "DESC",
		}
	}
}

const UNDEFINED: &Value = &Value::Undefined;

/// Compares the field tuples of two records, left to right. A missing
/// field compares as undefined.
pub fn compare_fields(fields: &[String], left: &Record, right: &Record) -> Ordering {
	fields.iter()
		.map(|field| {
			let l = left.get(field).unwrap_or(UNDEFINED);
			let r = right.get(field).unwrap_or(UNDEFINED);
			l.compare(r)
		})
		.find(|ordering| ordering.is_ne())
		.unwrap_or(Ordering::Equal)
}

/// Stable sort on the field tuple; ties keep their input order in both
/// directions.
pub fn order(fields: &[String], direction: Direction, mut rows: Vec<Record>) -> Vec<Record> {
	rows.sort_by(|left, right| {
		let ordering = compare_fields(fields, left, right);
		match direction {
			Direction::Asc => ordering,
			Direction::Desc => ordering.reverse(),
		}
	});
	rows
}

pub fn sort(comparator: &Comparator, mut rows: Vec<Record>) -> Vec<Record> {
	rows.sort_by(|left, right| comparator(left, right));
	rows
}
