// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use jsql_type::{Record, Result, Value};
use serde::{Deserialize, Serialize};

use crate::Constraint;

/// The condition attached to one field of a [`Query`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
	Single(Value),
	/// Every condition in the list must hold.
	All(Vec<Value>),
}

impl Condition {
	pub fn values(&self) -> &[Value] {
		match self {
			Condition::Single(value) => std::slice::from_ref(value),
			Condition::All(values) => values,
		}
	}
}

macro_rules! impl_condition_from {
	($($t:ty),*) => {
		$(
			impl From<$t> for Condition {
				fn from(value: $t) -> Self {
					Condition::Single(value.into())
				}
			}

			impl From<Vec<$t>> for Condition {
				fn from(values: Vec<$t>) -> Self {
					Condition::All(values.into_iter().map(Into::into).collect())
				}
			}
		)*
	};
}

impl_condition_from!(Value, &str, String, bool, i32, i64, f64);

/// Field name to condition; every field must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
	fields: IndexMap<String, Condition>,
}

impl Query {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, field: impl Into<String>, condition: impl Into<Condition>) -> Self {
		self.fields.insert(field.into(), condition.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &Condition)> {
		self.fields.iter().map(|(field, condition)| (field.as_str(), condition))
	}

	/// Parses every condition, failing on the first invalid one.
	pub fn compile(&self) -> Result<Vec<FieldConstraints>> {
		self.fields
			.iter()
			.map(|(field, condition)| {
				let constraints = condition
					.values()
					.iter()
					.map(|value| Constraint::parse(field, value))
					.collect::<Result<Vec<_>>>()?;
				Ok(FieldConstraints {
					field: field.clone(),
					constraints,
				})
			})
			.collect()
	}
}

impl<K: Into<String>, C: Into<Condition>> FromIterator<(K, C)> for Query {
	fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().map(|(field, condition)| (field.into(), condition.into())).collect(),
		}
	}
}

/// The parsed constraints of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConstraints {
	pub field: String,
	pub constraints: Vec<Constraint>,
}

impl FieldConstraints {
	pub fn matches(&self, record: &Record) -> bool {
		let value = record.get(&self.field);
		self.constraints.iter().all(|constraint| constraint.matches(value))
	}
}
