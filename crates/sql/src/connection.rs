// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use jsql_type::{Record, Result, Value};

use crate::Dialect;

/// A pooled connection to a relational engine.
///
/// Implementations turn SQL `NULL` into an absent field, so rows read back
/// look like records that never had the field. Dropping the future of an
/// in-flight `query` should abort the statement.
#[async_trait]
pub trait SqlConnection: Send + Sync {
	fn dialect(&self) -> Dialect;

	async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Record>>;
}
