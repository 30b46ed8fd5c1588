// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_type::{Error, Result};
use rusqlite::Connection;

use crate::{DbPath, OpenFlags, SqliteConfig};

/// Opens one connection configured as `config` says.
pub(crate) fn connect(config: &SqliteConfig) -> Result<Connection> {
	let flags = convert_flags(&config.flags);

	let connection = match &config.path {
		DbPath::File(path) => {
			if let Some(parent) = path.parent() {
				std::fs::create_dir_all(parent).map_err(|e| failed(&path.display().to_string(), e))?;
			}
			Connection::open_with_flags(path, flags).map_err(|e| failed(&path.display().to_string(), e))?
		}
		DbPath::Memory(name) => {
			let uri = config.path.uri().unwrap_or_default();
			Connection::open_with_flags(&uri, flags | rusqlite::OpenFlags::SQLITE_OPEN_URI)
				.map_err(|e| failed(name, e))?
		}
	};

	connection.busy_timeout(config.busy_timeout).map_err(|e| Error::upstream("sqlite", e))?;
	Ok(connection)
}

fn failed(path: &str, error: impl std::fmt::Display) -> Error {
	Error::upstream("sqlite", format!("failed to connect to database at {path}: {error}"))
}

fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut result = rusqlite::OpenFlags::empty();

	if flags.read_write {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	} else {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY;
	}
	if flags.create {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	result
}
