// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use jsql_type::Record;

/// Joins the fields' key texts. NUL does not occur in ordinary text, so
/// distinct field tuples never collide.
pub const KEY_SEPARATOR: &str = "\x00";

pub fn composite_key(fields: &[String], record: &Record) -> String {
	fields.iter()
		.map(|field| record.get(field).map(|value| value.to_key()).unwrap_or_default())
		.collect::<Vec<_>>()
		.join(KEY_SEPARATOR)
}

/// Keeps the first record of every distinct key, in input order.
///
/// Without `fields`, the key covers the first record's field names in
/// sorted order.
pub fn distinct(fields: Option<&[String]>, rows: Vec<Record>) -> Vec<Record> {
	let fields: Vec<String> = match fields {
		Some(fields) => fields.to_vec(),
		None => {
			let mut fields: Vec<String> =
				rows.first().map(|record| record.keys().cloned().collect()).unwrap_or_default();
			fields.sort();
			fields
		}
	};

	let mut seen = HashSet::with_capacity(rows.len());
	rows.into_iter().filter(|record| seen.insert(composite_key(&fields, record))).collect()
}

#[cfg(test)]
mod tests {
	use jsql_type::record;

	use super::*;

	#[test]
	fn test_keeps_first_of_each_key() {
		let rows = vec![
			record! { "Id" => 1, "a" => "x" },
			record! { "Id" => 2, "a" => "y" },
			record! { "Id" => 3, "a" => "x" },
		];
		let fields = vec!["a".to_string()];
		let result = distinct(Some(&fields), rows);
		assert_eq!(result, vec![record! { "Id" => 1, "a" => "x" }, record! { "Id" => 2, "a" => "y" }]);
	}

	#[test]
	fn test_default_fields_from_first_record() {
		let rows = vec![
			record! { "b" => 1, "a" => 2 },
			record! { "a" => 2, "b" => 1 },
			record! { "a" => 2, "b" => 3 },
		];
		assert_eq!(distinct(None, rows).len(), 2);
	}

	#[test]
	fn test_separator_prevents_collisions() {
		let rows = vec![record! { "a" => "x", "b" => "yz" }, record! { "a" => "xy", "b" => "z" }];
		let fields = vec!["a".to_string(), "b".to_string()];
		assert_eq!(distinct(Some(&fields), rows).len(), 2);
	}

	#[test]
	fn test_empty() {
		assert!(distinct(None, Vec::new()).is_empty());
	}
}
