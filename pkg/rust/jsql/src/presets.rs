// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_core::{MemoryProvider, Provider, ProviderConfig, ProviderRegistry};
use jsql_sqlite::SqliteProvider;
use jsql_type::{Error, Result};
use tracing::info;

/// The backends that can be built from configuration alone. Document and
/// remote providers need a driver or a channel and are constructed
/// directly.
pub fn registry() -> ProviderRegistry {
	let mut registry = ProviderRegistry::new();
	registry
		.register("memory", |config| Ok(Box::new(MemoryProvider::from_config(config)?)))
		.register("sqlite", |config| Ok(Box::new(SqliteProvider::from_config(config)?)));
	registry
}

/// Builds the provider described by the JSON `config` and opens it.
pub async fn connect(registry: &ProviderRegistry, config: &str) -> Result<Box<dyn Provider>> {
	let config: ProviderConfig = serde_json::from_str(config).map_err(|e| Error::Config(e.to_string()))?;
	let provider = registry.build(&config)?;
	provider.open().await?;
	info!(backend = provider.name(), "provider ready");
	Ok(provider)
}
