// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_core::{Cursor, CursorState, FetchOptions, Operation};
use jsql_type::{Data, Error, Result, Stage};
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
	RemoteConfig, RpcChannel,
	wire::{self, Request, RequestPayload, Response, ResponsePayload, SelectRequest},
};

/// A cursor whose pipeline is executed entirely by a remote peer.
pub struct RemoteCursor {
	state: CursorState,
	channel: Arc<dyn RpcChannel>,
	config: RemoteConfig,
}

impl RemoteCursor {
	pub fn new(collection: impl Into<String>, channel: Arc<dyn RpcChannel>) -> Self {
		Self {
			state: CursorState::new(Some(collection.into())),
			channel,
			config: RemoteConfig::default(),
		}
	}

	pub fn with_config(mut self, config: RemoteConfig) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &RemoteConfig {
		&self.config
	}

	async fn call(&self, args: Value) -> Result<Value> {
		let call = self.channel.call(&self.config.method, args);
		match self.config.timeout {
			Some(timeout) => tokio::time::timeout(timeout, call).await.map_err(|_| Error::Timeout {
				stage: Stage::Remote,
			})?,
			None => call.await,
		}
	}
}

#[async_trait]
impl Cursor for RemoteCursor {
	fn backend(&self) -> &'static str {
		"remote"
	}

	fn state(&self) -> &CursorState {
		&self.state
	}

	fn state_mut(&mut self) -> &mut CursorState {
		&mut self.state
	}

	fn copy(&self) -> Box<dyn Cursor> {
		Box::new(RemoteCursor {
			state: self.state.derive(),
			channel: self.channel.clone(),
			config: self.config.clone(),
		})
	}

	#[instrument(
		name = "cursor::remote::fetch",
		level = "debug",
		skip(self, options),
		fields(collection = ?self.state.collection, steps = self.state.pipeline.len(), method = %self.config.method)
	)]
	async fn fetch_with(&mut self, options: FetchOptions) -> Result<Data> {
		let operations = self.state.pipeline.take();
		let context = options.start();
		let collection = self.state.collection.clone().ok_or(Error::MissingCollection)?;

		for operation in &operations {
			if let Operation::Select(query) = operation {
				query.compile()?;
			}
		}
		let pipeline = wire::encode(operations, &context).await?;

		let id = Uuid::now_v7().to_string();
		let request = Request {
			id: id.clone(),
			payload: RequestPayload::Select(SelectRequest {
				collection,
				pipeline,
				timeout_ms: context.nested().timeout.map(|timeout| timeout.as_millis() as u64),
			}),
		};
		let args = serde_json::to_value(&request)?;

		let reply = context.guard(Stage::Remote, self.call(args)).await?;
		let response: Response = serde_json::from_value(reply).map_err(|e| Error::MalformedReply(e.to_string()))?;
		if response.id != id {
			return Err(Error::MalformedReply(format!("reply to request {:?}, expected {id:?}", response.id)));
		}

		match response.payload {
			ResponsePayload::Data(data) => {
				debug!(shape = data.shape(), len = data.len(), "peer replied");
				Ok(data)
			}
			ResponsePayload::Err(err) => Err(err.into()),
		}
	}
}
