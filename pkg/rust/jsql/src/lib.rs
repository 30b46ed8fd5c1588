// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! JSQL: build a query once, run it anywhere.
//!
//! ```no_run
//! use jsql::{CursorBuilder, Provider, Query};
//!
//! # async fn run(provider: &dyn Provider) -> jsql::Result<()> {
//! let born = provider
//! 	.select("persons", Query::new().with("Born", "< 1500"))?
//! 	.order("Born")
//! 	.col_field("Name")
//! 	.fetch()
//! 	.await?;
//! # Ok(())
//! # }
//! ```

mod presets;

pub use jsql_algebra as algebra;
pub use jsql_algebra::{Aggregate, Direction, Mapping, Projection, Query, Transform};
pub use jsql_core as core;
pub use jsql_core::{
	CancellationToken, Cursor, CursorBuilder, CursorId, FetchOptions, MemoryCursor, MemoryProvider, Operation,
	Provider, ProviderConfig, ProviderRegistry, Schema,
};
pub use jsql_document as document;
pub use jsql_document::{DocumentCursor, DocumentProvider};
pub use jsql_remote as remote;
pub use jsql_remote::{LoopbackChannel, RemoteConfig, RemoteCursor, RemoteProvider, RemoteService, RpcChannel};
pub use jsql_sql as sql;
pub use jsql_sql::{Dialect, RelationalCursor};
pub use jsql_sqlite as sqlite;
pub use jsql_sqlite::{SqliteConfig, SqliteProvider};
pub use jsql_sub_tracing::TracingBuilder;
pub use jsql_type::{Data, Error, Record, Result, Stage, Value, record};
pub use presets::{connect, registry};
