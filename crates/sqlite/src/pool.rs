// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ops::{Deref, DerefMut},
	sync::{Arc, Weak},
};

use async_trait::async_trait;
use indexmap::IndexSet;
use jsql_sql::{Dialect, SqlConnection, escape};
use jsql_type::{Error, Record, Result, Value};
use parking_lot::Mutex;
use rusqlite::{Connection, InterruptHandle, params_from_iter};
use tracing::{debug, instrument, trace};

use crate::{SqliteConfig, connection::connect, convert};

type Idle = Arc<Mutex<Vec<Connection>>>;

/// A connection on loan from the pool. It goes back when dropped, unless
/// the pool is full or gone.
pub struct PooledConnection {
	connection: Option<Connection>,
	pool: Weak<Mutex<Vec<Connection>>>,
	pool_size: usize,
}

impl Deref for PooledConnection {
	type Target = Connection;

	fn deref(&self) -> &Connection {
		self.connection.as_ref().expect("pooled connection already taken")
	}
}

impl DerefMut for PooledConnection {
	fn deref_mut(&mut self) -> &mut Connection {
		self.connection.as_mut().expect("pooled connection already taken")
	}
}

impl Drop for PooledConnection {
	fn drop(&mut self) {
		let Some(connection) = self.connection.take() else {
			return;
		};
		if let Some(pool) = self.pool.upgrade() {
			let mut idle = pool.lock();
			if idle.len() < self.pool_size {
				idle.push(connection);
			}
		}
	}
}

/// Interrupts the statement running on a borrowed connection unless
/// disarmed first. Dropping the fetch future fires it.
struct InterruptOnDrop {
	handle: InterruptHandle,
	armed: bool,
}

impl Drop for InterruptOnDrop {
	fn drop(&mut self) {
		if self.armed {
			debug!("interrupting sqlite statement");
			self.handle.interrupt();
		}
	}
}

/// A small pool of SQLite connections to one database.
pub struct SqlitePool {
	idle: Idle,
	config: SqliteConfig,
}

impl SqlitePool {
	#[instrument(name = "sqlite::pool::open", level = "info", skip(config), fields(path = ?config.path, pool_size = config.pool_size))]
	pub fn open(config: SqliteConfig) -> Result<Self> {
		let mut idle = Vec::with_capacity(config.pool_size);
		for _ in 0..config.pool_size.max(1) {
			idle.push(connect(&config)?);
		}
		Ok(Self {
			idle: Arc::new(Mutex::new(idle)),
			config,
		})
	}

	pub fn config(&self) -> &SqliteConfig {
		&self.config
	}

	/// Borrows an idle connection, or opens a new one when none is idle.
	pub fn get(&self) -> Result<PooledConnection> {
		let connection = match self.idle.lock().pop() {
			Some(connection) => connection,
			None => connect(&self.config)?,
		};
		Ok(PooledConnection {
			connection: Some(connection),
			pool: Arc::downgrade(&self.idle),
			pool_size: self.config.pool_size,
		})
	}

	pub fn idle(&self) -> usize {
		self.idle.lock().len()
	}

	/// Closes every idle connection. Borrowed connections close when they
	/// come back.
	pub fn close_all(&self) {
		self.idle.lock().clear();
	}

	/// Runs `f` on a pooled connection in the blocking thread pool.
	pub async fn with_connection<T, F>(&self, f: F) -> Result<T>
	where
		T: Send + 'static,
		F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
	{
		let mut connection = self.get()?;
		let mut guard = InterruptOnDrop {
			handle: connection.get_interrupt_handle(),
			armed: true,
		};

		let result = tokio::task::spawn_blocking(move || f(&mut connection))
			.await
			.map_err(|e| Error::upstream("sqlite", e))?;

		guard.armed = false;
		result
	}

	pub async fn execute_batch(&self, sql: impl Into<String>) -> Result<()> {
		let sql = sql.into();
		self.with_connection(move |connection| {
			connection.execute_batch(&sql).map_err(|e| Error::upstream("sqlite", e))
		})
		.await
	}

	/// Creates `table` if needed and appends `rows`. Columns are the union
	/// of the rows' fields and carry no declared type, so values keep their
	/// storage class. Missing fields are stored as `NULL`.
	pub async fn load(&self, table: &str, rows: Vec<Record>) -> Result<()> {
		let columns: IndexSet<String> = rows.iter().flat_map(|row| row.keys().cloned()).collect();
		if columns.is_empty() {
			return Ok(());
		}

		let table = escape::identifier(table)?;
		let quoted = columns.iter().map(|c| escape::identifier(c)).collect::<Result<Vec<_>>>()?;
		let create = format!("CREATE TABLE IF NOT EXISTS {table} ({})", quoted.join(", "));
		let insert = format!(
			"INSERT INTO {table} ({}) VALUES ({})",
			quoted.join(", "),
			(1..=columns.len()).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
		);

		self.with_connection(move |connection| {
			let tx = connection.transaction().map_err(|e| Error::upstream("sqlite", e))?;
			tx.execute(&create, []).map_err(|e| Error::upstream("sqlite", e))?;
			{
				let mut statement = tx.prepare(&insert).map_err(|e| Error::upstream("sqlite", e))?;
				for row in &rows {
					let values = columns
						.iter()
						.map(|column| convert::param(row.get(column).unwrap_or(&Value::Undefined)));
					statement.execute(params_from_iter(values)).map_err(|e| Error::upstream("sqlite", e))?;
				}
			}
			tx.commit().map_err(|e| Error::upstream("sqlite", e))
		})
		.await
	}
}

#[async_trait]
impl SqlConnection for SqlitePool {
	fn dialect(&self) -> Dialect {
		Dialect::Sqlite
	}

	#[instrument(name = "sqlite::query", level = "debug", skip(self, params), fields(sql = %sql))]
	async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Record>> {
		let sql = sql.to_string();
		let params: Vec<_> = params.iter().map(convert::param).collect();

		let rows = self
			.with_connection(move |connection| {
				let mut statement = connection.prepare(&sql).map_err(|e| Error::upstream("sqlite", e))?;
				let columns: Vec<String> = statement.column_names().into_iter().map(str::to_string).collect();

				let mut rows = statement.query(params_from_iter(params)).map_err(|e| Error::upstream("sqlite", e))?;
				let mut result = Vec::new();
				while let Some(row) = rows.next().map_err(|e| Error::upstream("sqlite", e))? {
					result.push(convert::record(&columns, row)?);
				}
				Ok(result)
			})
			.await?;

		trace!(rows = rows.len(), "query returned");
		Ok(rows)
	}
}

#[cfg(test)]
mod tests {
	use jsql_testing::tempdir::temp_dir;
	use jsql_type::record;

	use super::*;
	use crate::DbPath;

	#[test]
	fn test_connection_returns_to_pool() {
		temp_dir(|dir| {
			let pool = SqlitePool::open(SqliteConfig::new(dir.join("test.db")).pool_size(2)).unwrap();
			assert_eq!(pool.idle(), 2);
			{
				let _first = pool.get().unwrap();
				let _second = pool.get().unwrap();
				let _third = pool.get().unwrap();
				assert_eq!(pool.idle(), 0);
			}
			// the extra connection is closed, not pooled
			assert_eq!(pool.idle(), 2);

			pool.close_all();
			assert_eq!(pool.idle(), 0);
			Ok(())
		})
		.unwrap();
	}

	#[tokio::test]
	async fn test_load_and_query() {
		let pool = SqlitePool::open(SqliteConfig::in_memory()).unwrap();
		pool.load(
			"persons",
			vec![record! { "Id" => 1, "Name" => "Ada", "Score" => 1.5 }, record! { "Id" => 2, "Born" => 1815 }],
		)
		.await
		.unwrap();

		let rows = pool.query("SELECT * FROM \"persons\" ORDER BY rowid", &[]).await.unwrap();
		assert_eq!(
			rows,
			vec![
				record! { "Id" => 1, "Name" => "Ada", "Score" => 1.5 },
				record! { "Id" => 2, "Born" => 1815 },
			]
		);

		let rows = pool.query("SELECT \"Id\" FROM \"persons\" WHERE \"Born\" = ?1", &[Value::int8(1815)]).await.unwrap();
		assert_eq!(rows, vec![record! { "Id" => 2 }]);
	}

	#[tokio::test]
	async fn test_errors_are_upstream() {
		let pool = SqlitePool::open(SqliteConfig::in_memory()).unwrap();
		let err = pool.query("SELECT * FROM \"missing\"", &[]).await.unwrap_err();
		assert!(matches!(err, Error::Upstream { backend: "sqlite", .. }));
		assert!(err.to_string().contains("no such table"));
	}

	#[tokio::test]
	async fn test_memory_database_per_config() {
		let one = SqlitePool::open(SqliteConfig::in_memory()).unwrap();
		let two = SqlitePool::open(SqliteConfig::in_memory()).unwrap();
		assert!(matches!(one.config().path, DbPath::Memory(_)));

		one.execute_batch("CREATE TABLE t (a)").await.unwrap();
		assert!(one.query("SELECT * FROM t", &[]).await.unwrap().is_empty());
		assert!(two.query("SELECT * FROM t", &[]).await.is_err());
	}
}
