// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use jsql_algebra::Query;
use jsql_core::{Cursor, Provider, ProviderConfig, provider::seed};
use jsql_sql::RelationalCursor;
use jsql_type::{Error, Record, Result};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::{SqlitePool, SqliteConfig};

/// Serves cursors over the tables of one SQLite database.
pub struct SqliteProvider {
	config: SqliteConfig,
	pool: RwLock<Option<Arc<SqlitePool>>>,
}

impl SqliteProvider {
	pub fn new(config: SqliteConfig) -> Self {
		Self {
			config,
			pool: RwLock::new(None),
		}
	}

	pub fn from_config(config: &ProviderConfig) -> Result<Self> {
		Ok(Self::new(SqliteConfig::from_provider(config)?))
	}

	/// The open pool.
	pub fn pool(&self) -> Result<Arc<SqlitePool>> {
		self.pool.read().clone().ok_or_else(|| Error::upstream("sqlite", "provider is not open"))
	}

	/// Creates `table` if needed and appends `rows`.
	pub async fn load(&self, table: &str, rows: Vec<Record>) -> Result<()> {
		self.pool()?.load(table, rows).await
	}
}

#[async_trait]
impl Provider for SqliteProvider {
	fn name(&self) -> &'static str {
		"sqlite"
	}

	async fn open(&self) -> Result<()> {
		// held across the check so concurrent opens build one pool
		let mut slot = self.pool.write();
		if slot.is_some() {
			return Ok(());
		}
		*slot = Some(Arc::new(SqlitePool::open(self.config.clone())?));
		info!(path = ?self.config.path, "sqlite provider open");
		Ok(())
	}

	async fn close(&self) -> Result<()> {
		if let Some(pool) = self.pool.write().take() {
			pool.close_all();
			info!(path = ?self.config.path, "sqlite provider closed");
		}
		Ok(())
	}

	fn select(&self, collection: &str, query: Query) -> Result<Box<dyn Cursor>> {
		let pool = self.pool()?;
		debug!(collection, "sqlite select");

		let mut cursor = RelationalCursor::new(collection, pool);
		seed(&mut cursor, query);
		Ok(Box::new(cursor))
	}
}
