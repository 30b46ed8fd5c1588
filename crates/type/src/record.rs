// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;

use crate::Value;

/// A record: field name to value, in insertion order.
pub type Record = IndexMap<String, Value>;

/// Fields consulted, in order, for a record's identity.
pub const IDENTITY_FIELDS: [&str; 2] = ["id", "Id"];

/// Returns the normalized identity key of `record`, if it has one.
///
/// Identities are compared on their canonical text so that backends which
/// disagree on the identity type (`1`, `1.0`, `"1"`) still line up.
pub fn identity(record: &Record) -> Option<String> {
	IDENTITY_FIELDS
		.iter()
		.find_map(|field| record.get(*field))
		.filter(|value| !value.is_undefined())
		.map(|value| value.to_key().into_owned())
}

/// Builds a [`Record`] from `field => value` pairs.
#[macro_export]
macro_rules! record {
	() => {
		$crate::Record::new()
	};
	($($field:expr => $value:expr),+ $(,)?) => {{
		let mut record = $crate::Record::new();
		$(record.insert(($field).to_string(), $crate::Value::from($value));)+
		record
	}};
}
