// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Debug, Formatter};

use indexmap::IndexMap;
use jsql_type::{Error, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::Provider;

/// Which backend to build and its backend-specific options.
///
/// ```json
/// { "backend": "sqlite", "options": { "path": "/var/lib/app/db.sqlite", "pool_size": 4 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
	pub backend: String,
	#[serde(default)]
	pub options: serde_json::Map<String, serde_json::Value>,
}

impl ProviderConfig {
	pub fn new(backend: impl Into<String>) -> Self {
		Self {
			backend: backend.into(),
			options: serde_json::Map::new(),
		}
	}

	pub fn option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.options.insert(key.into(), value.into());
		self
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.options.get(key).and_then(serde_json::Value::as_str)
	}

	pub fn get_u64(&self, key: &str) -> Option<u64> {
		self.options.get(key).and_then(serde_json::Value::as_u64)
	}

	/// Deserializes the options into a backend's own option struct.
	pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_value(serde_json::Value::Object(self.options.clone()))
			.map_err(|err| Error::Config(format!("{}: {err}", self.backend)))
	}
}

pub type Constructor = Box<dyn Fn(&ProviderConfig) -> Result<Box<dyn Provider>> + Send + Sync>;

/// Backend name to provider constructor. Built explicitly and passed to
/// whatever assembles providers; there is no global instance.
#[derive(Default)]
pub struct ProviderRegistry {
	constructors: IndexMap<String, Constructor>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `constructor` under `backend`, replacing any earlier one.
	pub fn register<F>(&mut self, backend: impl Into<String>, constructor: F) -> &mut Self
	where
		F: Fn(&ProviderConfig) -> Result<Box<dyn Provider>> + Send + Sync + 'static,
	{
		self.constructors.insert(backend.into(), Box::new(constructor));
		self
	}

	pub fn contains(&self, backend: &str) -> bool {
		self.constructors.contains_key(backend)
	}

	pub fn backends(&self) -> impl Iterator<Item = &str> {
		self.constructors.keys().map(String::as_str)
	}

	pub fn build(&self, config: &ProviderConfig) -> Result<Box<dyn Provider>> {
		let constructor =
			self.constructors.get(&config.backend).ok_or_else(|| Error::UnknownBackend(config.backend.clone()))?;
		debug!(backend = %config.backend, "building provider");
		constructor(config)
	}
}

impl Debug for ProviderRegistry {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProviderRegistry").field("backends", &self.constructors.keys().collect::<Vec<_>>()).finish()
	}
}
