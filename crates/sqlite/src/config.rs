// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{path::PathBuf, time::Duration};

use jsql_core::ProviderConfig;
use jsql_type::Result;
use serde::Deserialize;
use uuid::Uuid;

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbPath {
	File(PathBuf),
	/// A named in-memory database shared by every connection of the pool.
	/// It lives as long as at least one connection stays open.
	Memory(String),
}

impl DbPath {
	pub(crate) fn uri(&self) -> Option<String> {
		match self {
			DbPath::File(_) => None,
			DbPath::Memory(name) => Some(format!("file:{name}?mode=memory&cache=shared")),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFlags {
	pub read_write: bool,
	pub create: bool,
	pub full_mutex: bool,
	pub no_mutex: bool,
	pub shared_cache: bool,
	pub private_cache: bool,
	pub uri: bool,
}

impl Default for OpenFlags {
	fn default() -> Self {
		Self {
			read_write: true,
			create: true,
			full_mutex: false,
			no_mutex: true,
			shared_cache: false,
			private_cache: false,
			uri: false,
		}
	}
}

impl OpenFlags {
	pub fn read_only() -> Self {
		Self {
			read_write: false,
			create: false,
			..Self::default()
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
	pub path: DbPath,
	/// Connections kept open; extra connections are opened on demand and
	/// closed when returned to a full pool.
	pub pool_size: usize,
	pub busy_timeout: Duration,
	pub flags: OpenFlags,
}

impl SqliteConfig {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: DbPath::File(path.into()),
			pool_size: 4,
			busy_timeout: Duration::from_secs(5),
			flags: OpenFlags::default(),
		}
	}

	/// A private in-memory database with a unique name.
	pub fn in_memory() -> Self {
		Self {
			path: DbPath::Memory(format!("jsql-{}", Uuid::new_v4())),
			..Self::new(PathBuf::new())
		}
	}

	pub fn path(mut self, path: DbPath) -> Self {
		self.path = path;
		self
	}

	pub fn pool_size(mut self, pool_size: usize) -> Self {
		self.pool_size = pool_size.max(1);
		self
	}

	pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
		self.busy_timeout = busy_timeout;
		self
	}

	pub fn flags(mut self, flags: OpenFlags) -> Self {
		self.flags = flags;
		self
	}

	/// Builds the config from provider options:
	/// `path` (a file, or `:memory:`), `pool_size`, `busy_timeout_ms`.
	pub fn from_provider(config: &ProviderConfig) -> Result<Self> {
		let options: SqliteOptions = config.decode()?;

		let mut result = match options.path.as_deref() {
			None | Some(":memory:") => Self::in_memory(),
			Some(path) => Self::new(path),
		};
		if let Some(pool_size) = options.pool_size {
			result = result.pool_size(pool_size);
		}
		if let Some(ms) = options.busy_timeout_ms {
			result = result.busy_timeout(Duration::from_millis(ms));
		}
		Ok(result)
	}
}

impl Default for SqliteConfig {
	fn default() -> Self {
		Self::in_memory()
	}
}

#[derive(Debug, Default, Deserialize)]
struct SqliteOptions {
	path: Option<String>,
	pool_size: Option<usize>,
	busy_timeout_ms: Option<u64>,
}
