// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

pub const DEFAULT_METHOD: &str = "jsql.select";

/// How a [`RemoteCursor`](crate::RemoteCursor) reaches its peer.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
	/// RPC method the peer serves selects under.
	pub method: String,
	/// Bound for a single call, on top of any fetch timeout.
	pub timeout: Option<Duration>,
}

impl Default for RemoteConfig {
	fn default() -> Self {
		Self {
			method: DEFAULT_METHOD.to_string(),
			timeout: None,
		}
	}
}

impl RemoteConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn method(mut self, method: impl Into<String>) -> Self {
		self.method = method.into();
		self
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}
}
