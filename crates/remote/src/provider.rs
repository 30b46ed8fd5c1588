// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_algebra::Query;
use jsql_core::{Cursor, Provider, provider::seed};
use jsql_type::Result;
use tracing::debug;

use crate::{RemoteConfig, RemoteCursor, RpcChannel};

/// Hands out cursors that a peer reached over `channel` executes.
pub struct RemoteProvider {
	channel: Arc<dyn RpcChannel>,
	config: RemoteConfig,
}

impl RemoteProvider {
	pub fn new(channel: Arc<dyn RpcChannel>) -> Self {
		Self {
			channel,
			config: RemoteConfig::default(),
		}
	}

	pub fn with_config(mut self, config: RemoteConfig) -> Self {
		self.config = config;
		self
	}
}

#[async_trait]
impl Provider for RemoteProvider {
	fn name(&self) -> &'static str {
		"remote"
	}

	fn select(&self, collection: &str, query: Query) -> Result<Box<dyn Cursor>> {
		debug!(collection, method = %self.config.method, "remote select");
		let mut cursor = RemoteCursor::new(collection, self.channel.clone()).with_config(self.config.clone());
		seed(&mut cursor, query);
		Ok(Box::new(cursor))
	}
}
