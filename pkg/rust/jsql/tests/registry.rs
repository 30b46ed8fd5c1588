// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{sync::Arc, time::Duration};

use jsql::{
	Cursor, CursorBuilder, Data, DocumentProvider, Error, FetchOptions, Provider, Query, SqliteConfig,
	SqliteProvider, Stage, Value, connect, document::DocumentStore, record, registry,
};
use jsql_testing::{fixture, tempdir::temp_dir};
use serde_json::json;

#[tokio::test]
async fn test_connect_memory() {
	let config = r#"{
		"backend": "memory",
		"options": { "collections": { "persons": [{ "Id": 1, "Born": 121 }, { "Id": 2, "Born": 1923 }] } }
	}"#;
	let provider = connect(&registry(), config).await.unwrap();
	assert_eq!(provider.name(), "memory");

	let data = provider.select("persons", Query::new().with("Born", ">1000")).unwrap().col_field("Id").fetch().await;
	assert_eq!(data.unwrap(), Data::Values(vec![Value::int8(2)]));
}

#[tokio::test]
async fn test_connect_errors() {
	let err = connect(&registry(), r#"{ "backend": "mongo" }"#).await.err().unwrap();
	assert!(matches!(err, Error::UnknownBackend(ref name) if name == "mongo"));

	let err = connect(&registry(), "backend = sqlite").await.err().unwrap();
	assert!(matches!(err, Error::Config(_)));

	let err = connect(&registry(), r#"{ "backend": "sqlite", "options": { "pool_size": "four" } }"#).await.err().unwrap();
	assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_connect_sqlite_file() {
	temp_dir(|dir| {
		let path = dir.join("persons.sqlite");
		let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
		runtime.block_on(async {
			let writer = SqliteProvider::new(SqliteConfig::new(path.clone()));
			writer.open().await.unwrap();
			writer.load("persons", fixture::persons()).await.unwrap();
			writer.close().await.unwrap();

			let config = json!({ "backend": "sqlite", "options": { "path": path, "pool_size": 2 } });
			let provider = connect(&registry(), &config.to_string()).await.unwrap();
			let data = provider.select("persons", Query::new()).unwrap().desc("Born").col_field("Name").fetch().await;
			assert_eq!(
				data.unwrap(),
				Data::Values(vec![
					Value::utf8("Turing"),
					Value::utf8("Wittgenstein"),
					Value::utf8("Pascal"),
					Value::utf8("Maimonides"),
					Value::utf8("Plato"),
				])
			);
			provider.close().await.unwrap();
		});
		Ok(())
	})
	.unwrap();
}

#[tokio::test]
async fn test_set_algebra_across_backends() {
	let sqlite = SqliteProvider::new(SqliteConfig::in_memory());
	sqlite.open().await.unwrap();
	sqlite.load("left", fixture::persons()).await.unwrap();

	// the document side keys its records `id`, as text
	let store = DocumentStore::new().with_collection(
		"right",
		vec![record! { "id" => "2", "Name" => "Turing" }, record! { "id" => "6", "Name" => "Hypatia" }],
	);
	let document = DocumentProvider::new(Arc::new(store));

	let mut left = sqlite.select("left", Query::new()).unwrap().select_to_memory().await.unwrap();
	let right = document.select("right", Query::new()).unwrap();
	let data = left.union(right).col_field("Name").fetch().await.unwrap();
	assert_eq!(
		data,
		Data::Values(vec![
			Value::utf8("Plato"),
			Value::utf8("Turing"),
			Value::utf8("Maimonides"),
			Value::utf8("Wittgenstein"),
			Value::utf8("Pascal"),
			Value::utf8("Hypatia"),
		])
	);

	let mut left = sqlite.select("left", Query::new()).unwrap();
	let right = document.select("right", Query::new()).unwrap();
	let data = left.intersection(right).col_field("Name").fetch().await.unwrap();
	assert_eq!(data, Data::Values(vec![Value::utf8("Turing")]));

	let mut left = sqlite.select("left", Query::new()).unwrap();
	let right = document.select("right", Query::new()).unwrap();
	let data = left.complement(right).col_field("Name").fetch().await.unwrap();
	assert_eq!(data, Data::Values(vec![Value::utf8("Hypatia")]));
}

#[tokio::test]
async fn test_timeout_reports_stage() {
	let store = DocumentStore::new().with_collection("persons", fixture::persons());
	store.create("persons").set_latency(Some(Duration::from_secs(60)));
	let provider = DocumentProvider::new(Arc::new(store));

	let mut cursor = provider.select("persons", Query::new()).unwrap();
	let err = cursor.count().fetch_with(FetchOptions::new().timeout(Duration::from_millis(20))).await.unwrap_err();
	assert!(matches!(
		err,
		Error::Timeout {
			stage: Stage::Pushdown
		}
	));
}
