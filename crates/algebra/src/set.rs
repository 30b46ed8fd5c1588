// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Identity-keyed set algebra.
//!
//! Identities come from [`jsql_type::identity`]. Each operation builds one
//! hash index, so all of them run in O(|A| + |B|). A record without an
//! identity never matches anything.

use std::collections::HashSet;

use jsql_type::{Record, identity};

fn index(rows: &[Record]) -> HashSet<String> {
	rows.iter().filter_map(identity).collect()
}

/// `left` in order, followed by the records of `right` whose identity has
/// not been seen yet.
pub fn union(left: Vec<Record>, right: Vec<Record>) -> Vec<Record> {
	let mut seen = index(&left);
	let mut result = left;
	result.extend(right.into_iter().filter(|record| match identity(record) {
		Some(id) => seen.insert(id),
		None => true,
	}));
	result
}

/// The records of `left` whose identity occurs in `right`.
pub fn intersection(left: Vec<Record>, right: Vec<Record>) -> Vec<Record> {
	let index = index(&right);
	left.into_iter().filter(|record| identity(record).is_some_and(|id| index.contains(&id))).collect()
}

/// The records of `left` whose identity does not occur in `right`.
pub fn difference(left: Vec<Record>, right: Vec<Record>) -> Vec<Record> {
	let index = index(&right);
	left.into_iter().filter(|record| !identity(record).is_some_and(|id| index.contains(&id))).collect()
}

/// `difference(right, left)`.
pub fn complement(left: Vec<Record>, right: Vec<Record>) -> Vec<Record> {
	difference(right, left)
}

#[cfg(test)]
mod tests {
	use jsql_type::record;
	use proptest::prelude::*;

	use super::*;

	fn ids(rows: &[Record]) -> Vec<String> {
		rows.iter().filter_map(identity).collect()
	}

	fn a() -> Vec<Record> {
		vec![record! { "Id" => 1 }, record! { "Id" => 2 }, record! { "Id" => 3 }]
	}

	fn b() -> Vec<Record> {
		vec![record! { "Id" => 3, "b" => true }, record! { "Id" => 4 }]
	}

	#[test]
	fn test_union() {
		assert_eq!(ids(&union(a(), b())), vec!["1", "2", "3", "4"]);
		// left wins on shared identities
		assert_eq!(union(a(), b())[2], record! { "Id" => 3 });
	}

	#[test]
	fn test_intersection() {
		assert_eq!(intersection(a(), b()), vec![record! { "Id" => 3 }]);
	}

	#[test]
	fn test_difference_and_complement() {
		assert_eq!(ids(&difference(a(), b())), vec!["1", "2"]);
		assert_eq!(ids(&complement(a(), b())), vec!["4"]);
	}

	#[test]
	fn test_mixed_identity_fields() {
		let left = vec![record! { "id" => 1 }];
		let right = vec![record! { "Id" => "1" }];
		assert_eq!(intersection(left, right).len(), 1);
	}

	fn dataset() -> impl Strategy<Value = Vec<Record>> {
		prop::collection::hash_set(0i64..40, 0..20)
			.prop_map(|ids| ids.into_iter().map(|id| record! { "Id" => id, "v" => id * 2 }).collect())
	}

	proptest! {
		#[test]
		fn prop_union_holds_every_identity_once(a in dataset(), b in dataset()) {
			let result = ids(&union(a.clone(), b.clone()));
			let unique: HashSet<_> = result.iter().cloned().collect();
			prop_assert_eq!(unique.len(), result.len());
			let expected: HashSet<_> = ids(&a).into_iter().chain(ids(&b)).collect();
			prop_assert_eq!(unique, expected);
		}

		#[test]
		fn prop_difference_and_intersection_rebuild_left(a in dataset(), b in dataset()) {
			let mut rebuilt: Vec<_> = ids(&difference(a.clone(), b.clone()));
			rebuilt.extend(ids(&intersection(a.clone(), b.clone())));
			rebuilt.sort();
			let mut expected = ids(&a);
			expected.sort();
			prop_assert_eq!(rebuilt, expected);
		}

		#[test]
		fn prop_intersection_within_both(a in dataset(), b in dataset()) {
			let right: HashSet<_> = ids(&b).into_iter().collect();
			let left: HashSet<_> = ids(&a).into_iter().collect();
			for id in ids(&intersection(a, b)) {
				prop_assert!(left.contains(&id) && right.contains(&id));
			}
		}

		#[test]
		fn prop_complement_is_reversed_difference(a in dataset(), b in dataset()) {
			prop_assert_eq!(complement(a.clone(), b.clone()), difference(b, a));
		}
	}
}
