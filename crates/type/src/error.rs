// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

/// The part of a fetch that was running when it stopped.
///
/// A fetch runs in at most two stages: whatever the backend executes itself
/// (a SQL statement, a native driver round trip, an RPC call) and the local
/// continuation over the returned rows. Each is cancelled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
	Pushdown,
	Continuation,
	Remote,
}

impl Display for Stage {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Stage::Pushdown => f.write_str("pushdown"),
			Stage::Continuation => f.write_str("continuation"),
			Stage::Remote => f.write_str("remote"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{backend} backend cannot execute {operation}")]
	UnsupportedOperation {
		backend: &'static str,
		operation: &'static str,
	},

	#[error("malformed reply from remote peer: {0}")]
	MalformedReply(String),

	#[error("invalid operator in condition {condition:?} on field {field:?}")]
	InvalidOperator {
		field: String,
		condition: String,
	},

	#[error("identifier {0:?} contains characters outside [A-Za-z0-9_]")]
	InvalidIdentifier(String),

	#[error("no collection bound to cursor")]
	MissingCollection,

	#[error("unknown collection {0:?}")]
	UnknownCollection(String),

	#[error("unknown backend {0:?}")]
	UnknownBackend(String),

	#[error("{operation} cannot be applied to {found}")]
	ShapeMismatch {
		operation: &'static str,
		found: &'static str,
	},

	#[error("{backend}: {message}")]
	Upstream {
		backend: &'static str,
		message: String,
	},

	#[error("remote error {code}: {message}")]
	Remote {
		code: String,
		message: String,
	},

	#[error("fetch cancelled during {stage}")]
	Cancelled {
		stage: Stage,
	},

	#[error("fetch timed out during {stage}")]
	Timeout {
		stage: Stage,
	},

	#[error("serialization failed: {0}")]
	Serialization(String),

	#[error("invalid configuration: {0}")]
	Config(String),
}

impl Error {
	/// Stable diagnostic code, carried across the RPC boundary.
	pub fn code(&self) -> &'static str {
		match self {
			Error::UnsupportedOperation {
				..
			} => "CURSOR_001",
			Error::MalformedReply(_) => "CURSOR_002",
			Error::InvalidOperator {
				..
			} => "QUERY_001",
			Error::InvalidIdentifier(_) => "QUERY_002",
			Error::MissingCollection => "QUERY_003",
			Error::UnknownCollection(_) => "QUERY_004",
			Error::UnknownBackend(_) => "PROVIDER_001",
			Error::ShapeMismatch {
				..
			} => "CURSOR_003",
			Error::Upstream {
				..
			} => "UPSTREAM_001",
			Error::Remote {
				..
			} => "UPSTREAM_002",
			Error::Cancelled {
				..
			} => "FETCH_001",
			Error::Timeout {
				..
			} => "FETCH_002",
			Error::Serialization(_) => "SERDE_001",
			Error::Config(_) => "CONFIG_001",
		}
	}

	pub fn upstream(backend: &'static str, error: impl Display) -> Self {
		Error::Upstream {
			backend,
			message: error.to_string(),
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Serialization(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_upstream_message_is_kept() {
		let err = Error::upstream("sqlite", "no such table: people");
		assert_eq!(err.to_string(), "sqlite: no such table: people");
		assert_eq!(err.code(), "UPSTREAM_001");
	}

	#[test]
	fn test_stage_display() {
		let err = Error::Cancelled {
			stage: Stage::Continuation,
		};
		assert_eq!(err.to_string(), "fetch cancelled during continuation");
	}
}
