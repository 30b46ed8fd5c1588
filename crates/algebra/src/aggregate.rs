// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_type::{Record, Value};
use serde::{Deserialize, Serialize};

/// Counts all records, or only those that own `field`. Ownership is what
/// counts: a field holding undefined, zero or false is still present.
pub fn count(field: Option<&str>, rows: &[Record]) -> Value {
	let n = match field {
		None => rows.len(),
		Some(field) => rows.iter().filter(|record| record.contains_key(field)).count(),
	};
	Value::Int8(n as i64)
}

/// The first record's values, in its own field order.
pub fn row(rows: Vec<Record>) -> Vec<Value> {
	rows.into_iter().next().map(|record| record.into_values().collect()).unwrap_or_default()
}

/// One field's value across all records; defaults to the first record's
/// first field.
pub fn col(field: Option<&str>, rows: Vec<Record>) -> Vec<Value> {
	let field = match field {
		Some(field) => field.to_string(),
		None => match rows.first().and_then(|record| record.keys().next()) {
			Some(field) => field.clone(),
			None => return Vec::new(),
		},
	};
	rows.into_iter().map(|mut record| record.swap_remove(&field).unwrap_or(Value::Undefined)).collect()
}

pub fn one(rows: Vec<Record>) -> Option<Record> {
	rows.into_iter().next()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregate {
	Sum,
	Avg,
	Min,
	Max,
}

impl Aggregate {
	pub fn name(&self) -> &'static str {
		match self {
			Aggregate::Sum => "sum",
			Aggregate::Avg => "avg",
			Aggregate::Min => "min",
			Aggregate::Max => "max",
		}
	}

	pub fn as_sql(&self) -> &'static str {
		match self {
			Aggregate::Sum => "SUM",
			Aggregate::Avg => "AVG",
			Aggregate::Min => "MIN",
			Aggregate::Max => "MAX",
		}
	}
}

/// Folds one field across the records. Undefined and missing values are
/// skipped; with nothing left the result is undefined, as in SQL.
pub fn aggregate(kind: Aggregate, field: &str, rows: &[Record]) -> Value {
	let values = rows.iter().filter_map(|record| record.get(field)).filter(|value| !value.is_undefined());

	match kind {
		Aggregate::Sum => sum(values.filter(|value| value.is_number())),
		Aggregate::Avg => {
			let numbers: Vec<f64> = values.filter_map(Value::as_f64).collect();
			if numbers.is_empty() {
				Value::Undefined
			} else {
				Value::Float8(numbers.iter().sum::<f64>() / numbers.len() as f64)
			}
		}
		// ties keep the first value seen, as SQL MIN and MAX do
		Aggregate::Min => values.min_by(|l, r| l.compare(r)).cloned().unwrap_or(Value::Undefined),
		Aggregate::Max => values
			.reduce(|best, value| if value.compare(best).is_gt() { value } else { best })
			.cloned()
			.unwrap_or(Value::Undefined),
	}
}

fn sum<'a>(values: impl Iterator<Item = &'a Value>) -> Value {
	let mut total: Option<Value> = None;
	for value in values {
		total = Some(match (total, value) {
			(None, value) => value.clone(),
			(Some(Value::Int8(acc)), Value::Int8(v)) => match acc.checked_add(*v) {
				Some(sum) => Value::Int8(sum),
				None => Value::Float8(acc as f64 + *v as f64),
			},
			(Some(acc), value) => {
				Value::Float8(acc.as_f64().unwrap_or_default() + value.as_f64().unwrap_or_default())
			}
		});
	}
	total.unwrap_or(Value::Undefined)
}
