// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_algebra::Direction;

/// The SQL flavours the compiler emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
	#[default]
	Sqlite,
	Postgres,
}

impl Dialect {
	/// Column that keeps ties in scan order, when the engine has one.
	pub fn tiebreak(&self) -> Option<&'static str> {
		match self {
			Dialect::Sqlite => Some("rowid"),
			Dialect::Postgres => None,
		}
	}

	/// Placeholder for the `n`th bound parameter, counting from one.
	pub fn placeholder(&self, n: usize) -> String {
		match self {
			Dialect::Sqlite => format!("?{n}"),
			Dialect::Postgres => format!("${n}"),
		}
	}

	/// Predicate true for float values of `column`, when the engine keeps
	/// per-value types.
	pub fn real_guard(&self, column: &str) -> Option<String> {
		match self {
			Dialect::Sqlite => Some(format!("typeof({column}) = 'real'")),
			Dialect::Postgres => None,
		}
	}

	/// One `ORDER BY` term. NULL sorts first ascending and last descending,
	/// the way undefined values sort in memory.
	pub fn order_term(&self, column: &str, direction: Direction) -> String {
		match self {
			Dialect::Sqlite => format!("{column} {}", direction.as_sql()),
			Dialect::Postgres => match direction {
				Direction::Asc => format!("{column} ASC NULLS FIRST"),
				Direction::Desc => format!("{column} DESC NULLS LAST"),
			},
		}
	}

	pub fn window(&self, take: Option<usize>, skip: usize) -> Option<String> {
		match (take, skip) {
			(None, 0) => None,
			(Some(take), 0) => Some(format!("LIMIT {take}")),
			(Some(take), skip) => Some(format!("LIMIT {take} OFFSET {skip}")),
			(None, skip) => Some(match self {
				Dialect::Sqlite => format!("LIMIT -1 OFFSET {skip}"),
				Dialect::Postgres => format!("OFFSET {skip}"),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_window() {
		assert_eq!(Dialect::Sqlite.window(None, 0), None);
		assert_eq!(Dialect::Sqlite.window(Some(1), 0).as_deref(), Some("LIMIT 1"));
		assert_eq!(Dialect::Sqlite.window(Some(1), 2).as_deref(), Some("LIMIT 1 OFFSET 2"));
		assert_eq!(Dialect::Sqlite.window(None, 2).as_deref(), Some("LIMIT -1 OFFSET 2"));
		assert_eq!(Dialect::Postgres.window(None, 2).as_deref(), Some("OFFSET 2"));
	}

	#[test]
	fn test_placeholder() {
		assert_eq!(Dialect::Sqlite.placeholder(1), "?1");
		assert_eq!(Dialect::Postgres.placeholder(12), "$12");
		assert_eq!(Dialect::Postgres.real_guard("\"a\""), None);
	}

	#[test]
	fn test_order_term() {
		assert_eq!(Dialect::Sqlite.order_term("\"a\"", Direction::Desc), "\"a\" DESC");
		assert_eq!(Dialect::Postgres.order_term("\"a\"", Direction::Asc), "\"a\" ASC NULLS FIRST");
	}
}
