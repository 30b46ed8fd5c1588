// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use indexmap::IndexMap;
use jsql_type::{Record, Value};

#[derive(Debug, Clone)]
pub enum Projection {
	/// Keep only these fields. Fields a record lacks are left out.
	Fields(Vec<String>),
	/// Target field to the source field and transforms producing it.
	Mapping(IndexMap<String, Mapping>),
}

impl Projection {
	pub fn fields<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
		Projection::Fields(fields.into_iter().map(Into::into).collect())
	}

	pub fn mapping<K: Into<String>>(mapping: impl IntoIterator<Item = (K, Mapping)>) -> Self {
		Projection::Mapping(mapping.into_iter().map(|(target, mapping)| (target.into(), mapping)).collect())
	}
}

#[derive(Debug, Clone)]
pub struct Mapping {
	pub source: String,
	pub transforms: Vec<Transform>,
}

impl Mapping {
	/// A plain rename.
	pub fn rename(source: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			transforms: Vec::new(),
		}
	}

	pub fn then(mut self, transform: Transform) -> Self {
		self.transforms.push(transform);
		self
	}
}

#[derive(Clone)]
pub enum Transform {
	Upper,
	Lower,
	Trim,
	/// Canonical text of the value.
	Text,
	/// Parses text into a number; booleans become 0 or 1.
	Number,
	/// Character count of text.
	Length,
	Abs,
	/// Rounds floats to the nearest integer.
	Round,
	Custom(Arc<dyn Fn(Value) -> Value + Send + Sync>),
}

impl Transform {
	pub fn name(&self) -> &'static str {
		match self {
			Transform::Upper => "upper",
			Transform::Lower => "lower",
			Transform::Trim => "trim",
			Transform::Text => "text",
			Transform::Number => "number",
			Transform::Length => "length",
			Transform::Abs => "abs",
			Transform::Round => "round",
			Transform::Custom(_) => "custom",
		}
	}

	pub fn apply(&self, value: Value) -> Value {
		match (self, value) {
			(Transform::Custom(f), value) => f(value),
			(Transform::Upper, Value::Utf8(s)) => Value::Utf8(s.to_uppercase()),
			(Transform::Lower, Value::Utf8(s)) => Value::Utf8(s.to_lowercase()),
			(Transform::Trim, Value::Utf8(s)) => Value::Utf8(s.trim().to_string()),
			(Transform::Text, Value::Undefined) => Value::Undefined,
			(Transform::Text, value) => Value::Utf8(value.to_key().into_owned()),
			(Transform::Number, Value::Utf8(s)) => Value::parse_number(s.trim()).unwrap_or(Value::Undefined),
			(Transform::Number, Value::Boolean(b)) => Value::Int8(b as i64),
			(Transform::Number, value) if value.is_number() => value,
			(Transform::Number, _) => Value::Undefined,
			(Transform::Length, Value::Utf8(s)) => Value::Int8(s.chars().count() as i64),
			(Transform::Length, _) => Value::Undefined,
			(Transform::Abs, Value::Int8(v)) => Value::Int8(v.saturating_abs()),
			(Transform::Abs, Value::Float8(v)) => Value::Float8(v.abs()),
			(Transform::Round, Value::Float8(v)) => Value::Int8(v.round() as i64),
			(_, value) => value,
		}
	}
}

impl Debug for Transform {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

pub fn project(projection: &Projection, rows: Vec<Record>) -> Vec<Record> {
	match projection {
		Projection::Fields(fields) => rows
			.into_iter()
			.map(|mut record| {
				fields.iter().filter_map(|field| record.swap_remove(field).map(|v| (field.clone(), v))).collect()
			})
			.collect(),
		Projection::Mapping(mapping) => rows
			.into_iter()
			.map(|record| {
				mapping.iter()
					.filter_map(|(target, mapping)| {
						let value = record.get(&mapping.source)?.clone();
						let value = mapping.transforms.iter().fold(value, |value, t| t.apply(value));
						Some((target.clone(), value))
					})
					.collect()
			})
			.collect(),
	}
}
