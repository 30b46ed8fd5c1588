// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_type::{Error, Record, Result, Value};
use rusqlite::{
	Row,
	types::{Value as SqlValue, ValueRef},
};

/// One result row as a record. `NULL` columns are left out.
pub(crate) fn record(columns: &[String], row: &Row<'_>) -> Result<Record> {
	let mut record = Record::with_capacity(columns.len());
	for (index, column) in columns.iter().enumerate() {
		let value = match row.get_ref(index).map_err(|e| Error::upstream("sqlite", e))? {
			ValueRef::Null => continue,
			ValueRef::Integer(n) => Value::Int8(n),
			ValueRef::Real(f) => Value::Float8(f),
			ValueRef::Text(bytes) => Value::Utf8(String::from_utf8_lossy(bytes).into_owned()),
			ValueRef::Blob(_) => {
				return Err(Error::upstream("sqlite", format!("column {column} holds a BLOB")));
			}
		};
		record.insert(column.clone(), value);
	}
	Ok(record)
}

pub(crate) fn param(value: &Value) -> SqlValue {
	match value {
		Value::Undefined => SqlValue::Null,
		Value::Boolean(b) => SqlValue::Integer(*b as i64),
		Value::Int8(n) => SqlValue::Integer(*n),
		Value::Float8(f) => SqlValue::Real(*f),
		Value::Utf8(text) => SqlValue::Text(text.clone()),
	}
}
