// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Local execution of a pipeline (or of the suffix a backend could not push
//! down) over already materialized data.

use jsql_algebra as algebra;
use jsql_type::{Data, Error, Record, Result, Stage, Value};
use tracing::trace;

use crate::{FetchContext, Operand, Operation};

/// Applies `operations` to `data` in order.
///
/// Set operations fetch their operand and wait for it before combining.
/// Cancellation and the deadline are checked between steps.
pub async fn run(operations: Vec<Operation>, mut data: Data, context: &FetchContext) -> Result<Data> {
	trace!(steps = operations.len(), shape = data.shape(), "continuation");
	for operation in operations {
		context.check(Stage::Continuation)?;
		data = apply(operation, data, context).await?;
	}
	Ok(data)
}

async fn apply(operation: Operation, data: Data, context: &FetchContext) -> Result<Data> {
	let name = operation.name();
	let data = match operation {
		Operation::Select(query) => Data::Rows(algebra::select(&query, data.into_rows(name)?)?),
		Operation::Filter(predicate) => Data::Rows(algebra::filter(&predicate, data.into_rows(name)?)),
		Operation::Find(predicate) => Data::Rows(algebra::find(&predicate, data.into_rows(name)?)),
		Operation::Projection(projection) => Data::Rows(algebra::project(&projection, data.into_rows(name)?)),
		Operation::Distinct(fields) => Data::Rows(algebra::distinct(fields.as_deref(), data.into_rows(name)?)),
		Operation::Sort(comparator) => Data::Rows(algebra::sort(&comparator, data.into_rows(name)?)),
		Operation::Order(fields) => {
			Data::Rows(algebra::order(&fields, algebra::Direction::Asc, data.into_rows(name)?))
		}
		Operation::Desc(fields) => {
			Data::Rows(algebra::order(&fields, algebra::Direction::Desc, data.into_rows(name)?))
		}
		Operation::Limit(n) => match data {
			Data::Rows(rows) => Data::Rows(algebra::limit(n, rows)),
			Data::Values(values) => Data::Values(algebra::limit(n, values)),
			other => return Err(mismatch(name, &other)),
		},
		Operation::Offset(n) => match data {
			Data::Rows(rows) => Data::Rows(algebra::offset(n, rows)),
			Data::Values(values) => Data::Values(algebra::offset(n, values)),
			other => return Err(mismatch(name, &other)),
		},
		Operation::Count(field) => match data {
			Data::Rows(rows) => Data::Values(vec![algebra::count(field.as_deref(), &rows)]),
			Data::Values(values) if field.is_none() => Data::Values(vec![Value::Int8(values.len() as i64)]),
			other => return Err(mismatch(name, &other)),
		},
		Operation::Aggregate(kind, field) => {
			Data::Values(vec![algebra::aggregate(kind, &field, &data.into_rows(name)?)])
		}
		Operation::Row => Data::Values(algebra::row(data.into_rows(name)?)),
		Operation::Col(field) => Data::Values(algebra::col(field.as_deref(), data.into_rows(name)?)),
		Operation::One => Data::One(algebra::one(data.into_rows(name)?)),
		Operation::Union(operand) => {
			let left = data.into_rows(name)?;
			Data::Rows(algebra::union(left, resolve(operand, name, context).await?))
		}
		Operation::Intersection(operand) => {
			let left = data.into_rows(name)?;
			Data::Rows(algebra::intersection(left, resolve(operand, name, context).await?))
		}
		Operation::Difference(operand) => {
			let left = data.into_rows(name)?;
			Data::Rows(algebra::difference(left, resolve(operand, name, context).await?))
		}
		Operation::Complement(operand) => {
			let left = data.into_rows(name)?;
			Data::Rows(algebra::complement(left, resolve(operand, name, context).await?))
		}
	};
	Ok(data)
}

/// Fetches a set operation's operand to completion.
pub async fn resolve(mut operand: Operand, operation: &'static str, context: &FetchContext) -> Result<Vec<Record>> {
	operand.cursor_mut().fetch_with(context.nested()).await?.into_rows(operation)
}

fn mismatch(operation: &'static str, data: &Data) -> Error {
	Error::ShapeMismatch {
		operation,
		found: data.shape(),
	}
}

#[cfg(test)]
mod tests {
	use jsql_algebra::Query;
	use jsql_type::record;

	use super::*;
	use crate::{FetchOptions, MemoryCursor};

	fn rows() -> Vec<Record> {
		vec![record! { "Id" => 2 }, record! { "Id" => 3 }, record! { "Id" => 4 }, record! { "Id" => 5 }]
	}

	async fn execute(operations: Vec<Operation>) -> Result<Data> {
		run(operations, Data::Rows(rows()), &FetchOptions::new().start()).await
	}

	#[tokio::test]
	async fn test_window_in_append_order() {
		let data = execute(vec![Operation::Offset(2), Operation::Limit(1)]).await.unwrap();
		assert_eq!(data, Data::Rows(vec![record! { "Id" => 4 }]));

		let data = execute(vec![Operation::Limit(1), Operation::Offset(2)]).await.unwrap();
		assert_eq!(data, Data::Rows(vec![]));
	}

	#[tokio::test]
	async fn test_window_over_values() {
		let data = execute(vec![Operation::Col(None), Operation::Offset(1), Operation::Limit(2)]).await.unwrap();
		assert_eq!(data, Data::Values(vec![Value::int8(3), Value::int8(4)]));

		let data = execute(vec![Operation::Col(None), Operation::Count(None)]).await.unwrap();
		assert_eq!(data, Data::Values(vec![Value::int8(4)]));
	}

	#[tokio::test]
	async fn test_shape_mismatch() {
		let err = execute(vec![Operation::Row, Operation::Order(vec!["Id".into()])]).await.unwrap_err();
		assert!(matches!(
			err,
			Error::ShapeMismatch {
				operation: "order",
				found: "values"
			}
		));
	}

	#[tokio::test]
	async fn test_set_operand_is_awaited() {
		let other = MemoryCursor::new(vec![record! { "Id" => 5 }, record! { "Id" => 6 }]);
		let data = execute(vec![Operation::Union(other.into())]).await.unwrap();
		assert_eq!(data.len(), 5);

		let other = MemoryCursor::new(vec![record! { "Id" => 3 }]);
		let data = execute(vec![Operation::Difference(other.into())]).await.unwrap();
		assert_eq!(data.len(), 3);
	}

	#[tokio::test]
	async fn test_invalid_condition_aborts() {
		let query = Query::new().with("Id", "<>3");
		let err = execute(vec![Operation::Limit(3), Operation::Select(query)]).await.unwrap_err();
		assert!(matches!(err, Error::InvalidOperator { .. }));
	}

	#[tokio::test]
	async fn test_cancelled_between_steps() {
		let options = FetchOptions::new();
		options.cancel.cancel();
		let err = run(vec![Operation::Limit(1)], Data::Rows(rows()), &options.start()).await.unwrap_err();
		assert!(matches!(
			err,
			Error::Cancelled {
				stage: Stage::Continuation
			}
		));
	}
}
