// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::{Error, Record, Result, Value};

/// What a fetch hands back.
///
/// Most pipelines end in `Rows`. `row`, `col`, `count` and the aggregates
/// flatten the result into `Values`; `one` yields a single record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Data {
	Rows(Vec<Record>),
	Values(Vec<Value>),
	One(Option<Record>),
}

impl Data {
	pub fn empty() -> Self {
		Data::Rows(Vec::new())
	}

	pub fn shape(&self) -> &'static str {
		match self {
			Data::Rows(_) => "rows",
			Data::Values(_) => "values",
			Data::One(_) => "one",
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Data::Rows(rows) => rows.len(),
			Data::Values(values) => values.len(),
			Data::One(record) => record.iter().count(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn rows(&self) -> Option<&[Record]> {
		match self {
			Data::Rows(rows) => Some(rows),
			_ => None,
		}
	}

	/// Unwraps `Rows`, failing with [`Error::ShapeMismatch`] otherwise.
	pub fn into_rows(self, operation: &'static str) -> Result<Vec<Record>> {
		match self {
			Data::Rows(rows) => Ok(rows),
			other => Err(Error::ShapeMismatch {
				operation,
				found: other.shape(),
			}),
		}
	}

	pub fn into_values(self, operation: &'static str) -> Result<Vec<Value>> {
		match self {
			Data::Values(values) => Ok(values),
			other => Err(Error::ShapeMismatch {
				operation,
				found: other.shape(),
			}),
		}
	}
}

impl From<Vec<Record>> for Data {
	fn from(rows: Vec<Record>) -> Self {
		Data::Rows(rows)
	}
}
