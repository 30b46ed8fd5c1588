// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{sync::Arc, time::Duration};

use jsql_algebra::Query;
use jsql_core::{FetchOptions, Provider};
use jsql_type::{Data, Error, Result};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
	config::DEFAULT_METHOD,
	wire::{ErrResponse, Request, RequestPayload, Response, ResponsePayload, SelectRequest},
};

/// The peer side: answers select requests from a local provider.
pub struct RemoteService {
	provider: Arc<dyn Provider>,
	method: String,
}

impl RemoteService {
	pub fn new(provider: Arc<dyn Provider>) -> Self {
		Self {
			provider,
			method: DEFAULT_METHOD.to_string(),
		}
	}

	pub fn with_method(mut self, method: impl Into<String>) -> Self {
		self.method = method.into();
		self
	}

	pub fn provider(&self) -> &Arc<dyn Provider> {
		&self.provider
	}

	/// Answers one call. Failures of the request itself are reported in the
	/// reply; only a reply that cannot be encoded is an `Err`.
	#[instrument(name = "remote::service::handle", level = "debug", skip(self, args), fields(backend = self.provider.name()))]
	pub async fn handle(&self, method: &str, args: Value) -> Result<Value> {
		let (id, result) = match serde_json::from_value::<Request>(args) {
			Ok(request) => (request.id, self.dispatch(method, request.payload).await),
			Err(err) => (String::new(), Err(err.into())),
		};

		let payload = match result {
			Ok(data) => ResponsePayload::Data(data),
			Err(err) => {
				warn!(%err, code = err.code(), "remote select failed");
				ResponsePayload::Err(ErrResponse::from(&err))
			}
		};
		Ok(serde_json::to_value(Response {
			id,
			payload,
		})?)
	}

	async fn dispatch(&self, method: &str, payload: RequestPayload) -> Result<Data> {
		if method != self.method {
			return Err(Error::upstream("remote", format!("unknown method {method:?}")));
		}

		let RequestPayload::Select(SelectRequest {
			collection,
			pipeline,
			timeout_ms,
		}) = payload;
		debug!(collection, steps = pipeline.len(), "select request");

		let mut cursor = self.provider.select(&collection, Query::new())?;
		for operation in pipeline {
			cursor.push(operation.into());
		}

		let mut options = FetchOptions::new();
		if let Some(timeout_ms) = timeout_ms {
			options = options.timeout(Duration::from_millis(timeout_ms));
		}
		cursor.fetch_with(options).await
	}
}

#[cfg(test)]
mod tests {
	use jsql_core::MemoryProvider;
	use jsql_type::{Value as JsqlValue, record};
	use serde_json::json;

	use super::*;

	fn service() -> RemoteService {
		let provider = MemoryProvider::new().with_collection(
			"persons",
			vec![record! { "Id" => 1, "Born" => 121 }, record! { "Id" => 2, "Born" => 1923 }],
		);
		RemoteService::new(Arc::new(provider))
	}

	#[tokio::test]
	async fn test_runs_pipeline_against_provider() {
		let args = json!({
			"id": "7",
			"type": "Select",
			"payload": {
				"collection": "persons",
				"pipeline": [{ "type": "Desc", "payload": ["Born"] }, { "type": "Col", "payload": "Id" }]
			}
		});
		let reply: Response = serde_json::from_value(service().handle(DEFAULT_METHOD, args).await.unwrap()).unwrap();
		assert_eq!(reply.id, "7");
		assert!(matches!(
			reply.payload,
			ResponsePayload::Data(Data::Values(values)) if values == vec![JsqlValue::int8(2), JsqlValue::int8(1)]
		));
	}

	#[tokio::test]
	async fn test_errors_are_replies() {
		let args = json!({
			"id": "8",
			"type": "Select",
			"payload": { "collection": "people", "pipeline": [] }
		});
		let reply: Response = serde_json::from_value(service().handle(DEFAULT_METHOD, args).await.unwrap()).unwrap();
		assert!(matches!(reply.payload, ResponsePayload::Err(ErrResponse { ref code, .. }) if code == "QUERY_004"));

		let reply: Response =
			serde_json::from_value(service().handle(DEFAULT_METHOD, json!({ "id": 1 })).await.unwrap()).unwrap();
		assert!(matches!(reply.payload, ResponsePayload::Err(ErrResponse { ref code, .. }) if code == "SERDE_001"));
	}

	#[tokio::test]
	async fn test_unknown_method() {
		let args = json!({
			"id": "9",
			"type": "Select",
			"payload": { "collection": "persons", "pipeline": [] }
		});
		let reply: Response = serde_json::from_value(service().handle("other.select", args).await.unwrap()).unwrap();
		assert!(matches!(reply.payload, ResponsePayload::Err(ErrResponse { ref code, .. }) if code == "UPSTREAM_001"));
	}
}
