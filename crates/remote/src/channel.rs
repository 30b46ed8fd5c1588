// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_type::{Error, Result};
use serde_json::Value;

use crate::RemoteService;

/// Transport to a remote peer. Errors returned here are transport failures;
/// errors raised by the peer come back inside the reply.
#[async_trait]
pub trait RpcChannel: Send + Sync {
	async fn call(&self, method: &str, args: Value) -> Result<Value>;
}

/// Serves calls with a [`RemoteService`] in this process.
///
/// Each call is encoded to bytes and handled on its own task, so the peer
/// sees exactly what a network transport would deliver and keeps running
/// when the caller gives up.
#[derive(Clone)]
pub struct LoopbackChannel {
	service: Arc<RemoteService>,
}

impl LoopbackChannel {
	pub fn new(service: Arc<RemoteService>) -> Self {
		Self {
			service,
		}
	}
}

#[async_trait]
impl RpcChannel for LoopbackChannel {
	async fn call(&self, method: &str, args: Value) -> Result<Value> {
		let request = serde_json::to_vec(&args)?;
		let service = self.service.clone();
		let method = method.to_string();

		let reply = tokio::spawn(async move {
			let args = serde_json::from_slice(&request)?;
			let reply = service.handle(&method, args).await?;
			Ok::<_, Error>(serde_json::to_vec(&reply)?)
		})
		.await
		.map_err(|e| Error::upstream("remote", e))??;

		Ok(serde_json::from_slice(&reply)?)
	}
}
