// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Messages exchanged with a remote peer.
//!
//! A request carries the collection name and the pipeline; set operands
//! travel as the rows they were fetched into. Closures cannot be encoded,
//! so a pipeline holding a predicate, a comparator or a custom transform is
//! refused before anything is sent.

use indexmap::IndexMap;
use jsql_algebra::{Aggregate, Mapping, Projection, Query, Transform};
use jsql_core::{FetchContext, MemoryCursor, Operation, continuation};
use jsql_type::{Data, Error, Record, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
	pub id: String,
	#[serde(flatten)]
	pub payload: RequestPayload,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum RequestPayload {
	Select(SelectRequest),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectRequest {
	pub collection: String,
	pub pipeline: Vec<WireOperation>,
	/// Time the caller has left; the peer stops its own fetch after it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
	pub id: String,
	#[serde(flatten)]
	pub payload: ResponsePayload,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ResponsePayload {
	Data(Data),
	Err(ErrResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrResponse {
	pub code: String,
	pub message: String,
}

impl From<&Error> for ErrResponse {
	fn from(err: &Error) -> Self {
		Self {
			code: err.code().to_string(),
			message: err.to_string(),
		}
	}
}

impl From<ErrResponse> for Error {
	fn from(err: ErrResponse) -> Self {
		Error::Remote {
			code: err.code,
			message: err.message,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WireOperation {
	Select(Query),
	Projection(WireProjection),
	Distinct(Option<Vec<String>>),
	Order(Vec<String>),
	Desc(Vec<String>),
	Limit(usize),
	Offset(usize),
	Count(Option<String>),
	Aggregate {
		kind: Aggregate,
		field: String,
	},
	Row,
	Col(Option<String>),
	One,
	Union(Vec<Record>),
	Intersection(Vec<Record>),
	Difference(Vec<Record>),
	Complement(Vec<Record>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WireProjection {
	Fields(Vec<String>),
	Mapping(IndexMap<String, WireMapping>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMapping {
	pub source: String,
	#[serde(default)]
	pub transforms: Vec<WireTransform>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireTransform {
	Upper,
	Lower,
	Trim,
	Text,
	Number,
	Length,
	Abs,
	Round,
}

/// The first operation that cannot be encoded, if any.
pub fn unsupported(operations: &[Operation]) -> Option<&'static str> {
	operations.iter().find(|operation| operation.is_opaque()).map(Operation::name)
}

/// Encodes `operations`, fetching every set operand to completion first.
pub async fn encode(operations: Vec<Operation>, context: &FetchContext) -> Result<Vec<WireOperation>> {
	if let Some(operation) = unsupported(&operations) {
		return Err(Error::UnsupportedOperation {
			backend: "remote",
			operation,
		});
	}

	let mut encoded = Vec::with_capacity(operations.len());
	for operation in operations {
		let name = operation.name();
		let wire = match operation {
			Operation::Select(query) => WireOperation::Select(query),
			Operation::Projection(projection) => WireOperation::Projection(projection_to_wire(projection, name)?),
			Operation::Distinct(fields) => WireOperation::Distinct(fields),
			Operation::Order(fields) => WireOperation::Order(fields),
			Operation::Desc(fields) => WireOperation::Desc(fields),
			Operation::Limit(n) => WireOperation::Limit(n),
			Operation::Offset(n) => WireOperation::Offset(n),
			Operation::Count(field) => WireOperation::Count(field),
			Operation::Aggregate(kind, field) => WireOperation::Aggregate {
				kind,
				field,
			},
			Operation::Row => WireOperation::Row,
			Operation::Col(field) => WireOperation::Col(field),
			Operation::One => WireOperation::One,
			Operation::Union(operand) => WireOperation::Union(continuation::resolve(operand, name, context).await?),
			Operation::Intersection(operand) => {
				WireOperation::Intersection(continuation::resolve(operand, name, context).await?)
			}
			Operation::Difference(operand) => {
				WireOperation::Difference(continuation::resolve(operand, name, context).await?)
			}
			Operation::Complement(operand) => {
				WireOperation::Complement(continuation::resolve(operand, name, context).await?)
			}
			Operation::Filter(_) | Operation::Find(_) | Operation::Sort(_) => {
				return Err(Error::UnsupportedOperation {
					backend: "remote",
					operation: name,
				});
			}
		};
		encoded.push(wire);
	}
	Ok(encoded)
}

fn projection_to_wire(projection: Projection, name: &'static str) -> Result<WireProjection> {
	match projection {
		Projection::Fields(fields) => Ok(WireProjection::Fields(fields)),
		Projection::Mapping(mapping) => mapping
			.into_iter()
			.map(|(target, mapping)| {
				let transforms = mapping
					.transforms
					.iter()
					.map(|transform| transform_to_wire(transform, name))
					.collect::<Result<Vec<_>>>()?;
				Ok((
					target,
					WireMapping {
						source: mapping.source,
						transforms,
					},
				))
			})
			.collect::<Result<IndexMap<_, _>>>()
			.map(WireProjection::Mapping),
	}
}

fn transform_to_wire(transform: &Transform, name: &'static str) -> Result<WireTransform> {
	Ok(match transform {
		Transform::Upper => WireTransform::Upper,
		Transform::Lower => WireTransform::Lower,
		Transform::Trim => WireTransform::Trim,
		Transform::Text => WireTransform::Text,
		Transform::Number => WireTransform::Number,
		Transform::Length => WireTransform::Length,
		Transform::Abs => WireTransform::Abs,
		Transform::Round => WireTransform::Round,
		Transform::Custom(_) => {
			return Err(Error::UnsupportedOperation {
				backend: "remote",
				operation: name,
			});
		}
	})
}

impl From<WireOperation> for Operation {
	fn from(operation: WireOperation) -> Self {
		match operation {
			WireOperation::Select(query) => Operation::Select(query),
			WireOperation::Projection(projection) => Operation::Projection(projection.into()),
			WireOperation::Distinct(fields) => Operation::Distinct(fields),
			WireOperation::Order(fields) => Operation::Order(fields),
			WireOperation::Desc(fields) => Operation::Desc(fields),
			WireOperation::Limit(n) => Operation::Limit(n),
			WireOperation::Offset(n) => Operation::Offset(n),
			WireOperation::Count(field) => Operation::Count(field),
			WireOperation::Aggregate {
				kind,
				field,
			} => Operation::Aggregate(kind, field),
			WireOperation::Row => Operation::Row,
			WireOperation::Col(field) => Operation::Col(field),
			WireOperation::One => Operation::One,
			WireOperation::Union(rows) => Operation::Union(MemoryCursor::new(rows).into()),
			WireOperation::Intersection(rows) => Operation::Intersection(MemoryCursor::new(rows).into()),
			WireOperation::Difference(rows) => Operation::Difference(MemoryCursor::new(rows).into()),
			WireOperation::Complement(rows) => Operation::Complement(MemoryCursor::new(rows).into()),
		}
	}
}

impl From<WireProjection> for Projection {
	fn from(projection: WireProjection) -> Self {
		match projection {
			WireProjection::Fields(fields) => Projection::Fields(fields),
			WireProjection::Mapping(mapping) => Projection::Mapping(
				mapping.into_iter()
					.map(|(target, mapping)| {
						let transforms = mapping.transforms.into_iter().map(Transform::from).collect();
						(
							target,
							Mapping {
								source: mapping.source,
								transforms,
							},
						)
					})
					.collect(),
			),
		}
	}
}

impl From<WireTransform> for Transform {
	fn from(transform: WireTransform) -> Self {
		match transform {
			WireTransform::Upper => Transform::Upper,
			WireTransform::Lower => Transform::Lower,
			WireTransform::Trim => Transform::Trim,
			WireTransform::Text => Transform::Text,
			WireTransform::Number => Transform::Number,
			WireTransform::Length => Transform::Length,
			WireTransform::Abs => Transform::Abs,
			WireTransform::Round => Transform::Round,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use jsql_core::FetchOptions;
	use jsql_type::{Value, record};
	use serde_json::json;

	use super::*;

	#[tokio::test]
	async fn test_set_operand_ships_as_rows() {
		let context = FetchOptions::new().start();
		let operand = MemoryCursor::new(vec![record! { "Id" => 1 }, record! { "Id" => 2 }]);
		let encoded =
			encode(vec![Operation::Limit(1), Operation::Union(operand.into())], &context).await.unwrap();
		assert_eq!(
			encoded,
			vec![WireOperation::Limit(1), WireOperation::Union(vec![record! { "Id" => 1 }, record! { "Id" => 2 }])]
		);
	}

	#[tokio::test]
	async fn test_opaque_operation_is_refused_before_operands_run() {
		let context = FetchOptions::new().start();
		let err = encode(vec![Operation::Filter(Arc::new(|_: &Record| true))], &context).await.unwrap_err();
		assert!(matches!(
			err,
			Error::UnsupportedOperation {
				backend: "remote",
				operation: "filter"
			}
		));

		let custom = Mapping::rename("Name").then(Transform::Custom(Arc::new(|v: Value| v)));
		let projection = Projection::Mapping(IndexMap::from([("name".to_string(), custom)]));
		let err = encode(vec![Operation::Projection(projection)], &context).await.unwrap_err();
		assert!(matches!(
			err,
			Error::UnsupportedOperation {
				operation: "projection",
				..
			}
		));
	}

	#[test]
	fn test_request_envelope() {
		let request = Request {
			id: "1".to_string(),
			payload: RequestPayload::Select(SelectRequest {
				collection: "persons".to_string(),
				pipeline: vec![
					WireOperation::Order(vec!["Born".to_string()]),
					WireOperation::Aggregate {
						kind: Aggregate::Max,
						field: "Born".to_string(),
					},
				],
				timeout_ms: None,
			}),
		};
		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({
				"id": "1",
				"type": "Select",
				"payload": {
					"collection": "persons",
					"pipeline": [
						{ "type": "Order", "payload": ["Born"] },
						{ "type": "Aggregate", "payload": { "kind": "Max", "field": "Born" } }
					]
				}
			})
		);
	}

	#[test]
	fn test_error_reply_keeps_code() {
		let reply = ErrResponse::from(&Error::UnknownCollection("people".into()));
		assert_eq!(reply.code, "QUERY_004");

		let err = Error::from(reply);
		assert!(matches!(err, Error::Remote { ref code, .. } if code == "QUERY_004"));
	}
}
