// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name to type name, carried by a cursor for whoever validates or
/// authorises downstream. Cursors never interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
	fields: IndexMap<String, String>,
}

impl Schema {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, field: impl Into<String>, ty: impl Into<String>) -> Self {
		self.fields.insert(field.into(), ty.into());
		self
	}

	pub fn get(&self, field: &str) -> Option<&str> {
		self.fields.get(field).map(String::as_str)
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
		self.fields.iter().map(|(field, ty)| (field.as_str(), ty.as_str()))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}
