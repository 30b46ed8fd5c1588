// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use common::Backends;
use jsql::{Cursor, CursorBuilder, Data, MemoryCursor, Record, Value};
use proptest::prelude::*;

fn block_on<F: Future>(future: F) -> F::Output {
	tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(future)
}

fn arb_rows() -> impl Strategy<Value = Vec<Record>> {
	prop::collection::vec((0i64..3, prop_oneof![Just("x"), Just("y")], any::<bool>()), 0..12).prop_map(|fields| {
		fields.into_iter()
			.map(|(a, b, with_c)| {
				let mut record = Record::new();
				record.insert("a".to_string(), Value::int8(a));
				record.insert("b".to_string(), Value::utf8(b));
				if with_c {
					record.insert("c".to_string(), Value::bool(true));
				}
				record
			})
			.collect()
	})
}

fn arb_selection() -> impl Strategy<Value = Option<Vec<&'static str>>> {
	prop_oneof![Just(None), Just(Some(vec!["a"])), Just(Some(vec!["b", "a"])), Just(Some(vec!["c"]))]
}

fn distinct(cursor: &mut MemoryCursor, selection: &Option<Vec<&'static str>>) {
	match selection {
		None => {
			cursor.distinct();
		}
		Some(fields) => {
			cursor.distinct_by(fields.clone());
		}
	}
}

/// Distinct values of `Born`-like keys, in a random order.
fn arb_unique_keys() -> impl Strategy<Value = Vec<i64>> {
	prop::collection::hash_set(-1000i64..1000, 1..10).prop_map(|keys| keys.into_iter().collect()).prop_shuffle()
}

proptest! {
	#[test]
	fn test_distinct_is_idempotent(rows in arb_rows(), selection in arb_selection()) {
		let (once, twice) = block_on(async {
			let mut cursor = MemoryCursor::new(rows);
			distinct(&mut cursor, &selection);
			let once = cursor.fetch().await.unwrap();

			distinct(&mut cursor, &selection);
			distinct(&mut cursor, &selection);
			let twice = cursor.fetch().await.unwrap();
			(once, twice)
		});
		prop_assert_eq!(once, twice);
	}
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(32))]

	#[test]
	fn test_desc_reverses_order(keys in arb_unique_keys()) {
		let rows: Vec<Record> = keys
			.iter()
			.enumerate()
			.map(|(i, key)| jsql::record! { "Id" => i as i64, "Key" => *key })
			.collect();

		let results = block_on(async {
			let backends = Backends::new(rows).await;
			let mut results = Vec::new();
			for mut cursor in backends.cursors() {
				let ascending = cursor.order("Key").fetch().await.unwrap();
				let descending = cursor.order("Key").desc("Key").fetch().await.unwrap();
				results.push((cursor.backend(), ascending, descending));
			}
			results
		});

		for (backend, ascending, descending) in results {
			let Data::Rows(mut ascending) = ascending else {
				panic!("{backend}: expected rows");
			};
			ascending.reverse();
			prop_assert_eq!(descending, Data::Rows(ascending), "backend {}", backend);
		}
	}
}
