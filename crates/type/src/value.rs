// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Cow,
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// A field value as it travels between backends.
///
/// Serialized untagged so that records map one to one onto JSON objects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Value is not defined (SQL NULL, JSON null)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte signed integer
	Int8(i64),
	/// An 8-byte floating point
	Float8(f64),
	/// A UTF-8 encoded text
	Utf8(String),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	pub fn float8(v: impl Into<f64>) -> Self {
		Value::Float8(v.into())
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	pub fn is_number(&self) -> bool {
		matches!(self, Value::Int8(_) | Value::Float8(_))
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Int8(v) => Some(*v as f64),
			Value::Float8(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Utf8(v) => Some(v),
			_ => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Undefined => "undefined",
			Value::Boolean(_) => "boolean",
			Value::Int8(_) => "int8",
			Value::Float8(_) => "float8",
			Value::Utf8(_) => "utf8",
		}
	}

	/// Parses `text` as a number, preferring an integer. Only a complete
	/// match counts: `"12abc"` is not a number.
	pub fn parse_number(text: &str) -> Option<Value> {
		if text.is_empty() {
			return None;
		}
		if let Ok(v) = text.parse::<i64>() {
			return Some(Value::Int8(v));
		}
		match text.parse::<f64>() {
			Ok(v) if v.is_finite() => Some(Value::Float8(v)),
			_ => None,
		}
	}

	fn rank(&self) -> u8 {
		match self {
			Value::Undefined => 0,
			Value::Boolean(_) => 1,
			Value::Int8(_) | Value::Float8(_) => 2,
			Value::Utf8(_) => 3,
		}
	}

	/// Total order used by sorting and by range constraints.
	///
	/// Undefined < Boolean < numbers < text. Integers and floats compare
	/// numerically with each other; text compares bytewise.
	pub fn compare(&self, other: &Value) -> Ordering {
		match (self, other) {
			(Value::Undefined, Value::Undefined) => Ordering::Equal,
			(Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),
			(Value::Int8(l), Value::Int8(r)) => l.cmp(r),
			(Value::Utf8(l), Value::Utf8(r)) => l.as_bytes().cmp(r.as_bytes()),
			(l, r) if l.is_number() && r.is_number() => {
				let (l, r) = (l.as_f64().unwrap_or_default(), r.as_f64().unwrap_or_default());
				l.partial_cmp(&r).unwrap_or_else(|| l.total_cmp(&r))
			}
			(l, r) => l.rank().cmp(&r.rank()),
		}
	}

	/// Canonical text used for composite keys and identities.
	///
	/// Undefined renders as the empty string and integral floats render
	/// like integers, so `1` and `1.0` produce the same key.
	pub fn to_key(&self) -> Cow<'_, str> {
		match self {
			Value::Undefined => Cow::Borrowed(""),
			Value::Boolean(true) => Cow::Borrowed("true"),
			Value::Boolean(false) => Cow::Borrowed("false"),
			Value::Int8(v) => Cow::Owned(v.to_string()),
			Value::Float8(v) => Cow::Owned(float_text(*v)),
			Value::Utf8(v) => Cow::Borrowed(v),
		}
	}
}

fn float_text(v: f64) -> String {
	if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
		format!("{}", v as i64)
	} else {
		v.to_string()
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Utf8(v) => write!(f, "'{v}'"),
			other => f.write_str(&other.to_key()),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int8(v as i64)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int8(v)
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Int8(v as i64)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float8(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Utf8(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Value::Undefined)
	}
}
