// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_algebra::{Aggregate, Direction, Operator, Query};
use jsql_core::Operation;
use jsql_type::{Error, Result, Value};
use tracing::debug;

use crate::{Dialect, escape};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
	pub dialect: Dialect,
	/// Appended to every `ORDER BY` so rows that tie keep scan order.
	pub tiebreak: Option<String>,
}

impl Default for CompilerOptions {
	fn default() -> Self {
		Self::new(Dialect::default())
	}
}

impl CompilerOptions {
	pub fn new(dialect: Dialect) -> Self {
		Self {
			dialect,
			tiebreak: dialect.tiebreak().map(str::to_string),
		}
	}

	pub fn tiebreak(mut self, column: Option<impl Into<String>>) -> Self {
		self.tiebreak = column.map(Into::into);
		self
	}
}

/// What the statement returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
	Rows,
	/// One row holding a single aggregate in column `value`.
	Scalar,
}

/// Alias of the aggregate column in scalar statements.
pub const SCALAR_COLUMN: &str = "value";

#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
	pub sql: String,
	/// Values bound to the statement's placeholders, in placeholder order.
	pub params: Vec<Value>,
	/// Number of leading pipeline steps the statement covers.
	pub consumed: usize,
	pub output: Output,
}

#[derive(Default)]
struct Clauses {
	aggregate: Option<String>,
	wheres: Vec<String>,
	params: Vec<Value>,
	order: Vec<(String, Direction)>,
	skip: usize,
	take: Option<usize>,
	windowed: bool,
}

/// How much of one query made it into the `WHERE` clause.
enum Pushed {
	All,
	/// Predicates keep a superset of the matching rows. The query itself
	/// still runs in memory.
	Prefilter,
	Nothing,
}

/// Translates the longest prefix of `operations` that one `SELECT` over
/// `table` can express.
///
/// Translation stops at the first step it cannot express, and at every step
/// whose meaning would change if it were folded into the same statement as
/// what came before (a `select` after a `limit`, for instance). Constraints
/// are parsed even when the rows end up filtered in memory, so an invalid
/// operator fails before anything is sent. Constraint values are bound as
/// parameters, never spliced into the text.
pub fn compile(table: Option<&str>, operations: &[Operation], options: &CompilerOptions) -> Result<Compiled> {
	let table = escape::identifier(table.ok_or(Error::MissingCollection)?)?;
	let dialect = options.dialect;

	for operation in operations {
		if let Operation::Select(query) = operation {
			query.compile()?;
		}
	}

	let mut clauses = Clauses::default();
	let mut consumed = 0;

	for operation in operations {
		if clauses.aggregate.is_some() {
			break;
		}

		let translated = match operation {
			Operation::Select(query) if !clauses.windowed => match select(dialect, query, &mut clauses)? {
				Pushed::All => true,
				Pushed::Prefilter => break,
				Pushed::Nothing => false,
			},
			Operation::Order(fields) | Operation::Desc(fields) if !clauses.windowed => {
				let direction = match operation {
					Operation::Desc(_) => Direction::Desc,
					_ => Direction::Asc,
				};
				// later keys take precedence, earlier ones break ties
				let mut keys = fields
					.iter()
					.map(|field| Ok((escape::identifier(field)?, direction)))
					.collect::<Result<Vec<_>>>()?;
				keys.append(&mut clauses.order);
				clauses.order = keys;
				true
			}
			Operation::Limit(n) => {
				clauses.take = Some(clauses.take.map_or(*n, |take| take.min(*n)));
				clauses.windowed = true;
				true
			}
			Operation::Offset(n) => {
				clauses.skip += n;
				clauses.take = clauses.take.map(|take| take.saturating_sub(*n));
				clauses.windowed = true;
				true
			}
			Operation::Count(None) if !clauses.windowed => {
				clauses.aggregate = Some("COUNT(*)".to_string());
				true
			}
			// SUM and AVG coerce text to numbers, so only the ordering
			// aggregates agree with memory. Equal extremes such as 2 and 2.0
			// resolve to the first one scanned, which ignores ORDER BY.
			Operation::Aggregate(kind @ (Aggregate::Min | Aggregate::Max), field)
				if !clauses.windowed && clauses.order.is_empty() =>
			{
				clauses.aggregate = Some(format!("{}({})", kind.as_sql(), escape::identifier(field)?));
				true
			}
			_ => false,
		};

		if !translated {
			break;
		}
		consumed += 1;
	}

	let mut sql = String::from("SELECT ");
	let output = match &clauses.aggregate {
		Some(aggregate) => {
			sql.push_str(&format!("{aggregate} AS \"{SCALAR_COLUMN}\""));
			Output::Scalar
		}
		None => {
			sql.push('*');
			Output::Rows
		}
	};
	sql.push_str(" FROM ");
	sql.push_str(&table);

	if !clauses.wheres.is_empty() {
		sql.push_str(" WHERE ");
		sql.push_str(&clauses.wheres.join(" AND "));
	}

	if output == Output::Rows {
		let mut terms: Vec<String> =
			clauses.order.iter().map(|(column, direction)| dialect.order_term(column, *direction)).collect();
		if let Some(tiebreak) = &options.tiebreak {
			terms.push(dialect.order_term(tiebreak, Direction::Asc));
		}
		if !terms.is_empty() {
			sql.push_str(" ORDER BY ");
			sql.push_str(&terms.join(", "));
		}
		if let Some(window) = dialect.window(clauses.take, clauses.skip) {
			sql.push(' ');
			sql.push_str(&window);
		}
	}

	debug!(sql = %sql, params = clauses.params.len(), consumed, total = operations.len(), "compiled pipeline");
	Ok(Compiled {
		sql,
		params: clauses.params,
		consumed,
		output,
	})
}

/// Adds the predicates of one query. Leaves `clauses` untouched when some
/// constraint has no SQL counterpart at all.
///
/// `LIKE` matches the text an engine renders for a value, and engines render
/// floats differently than [`Value::to_key`] does (`2.0` against `2`). A
/// like constraint is therefore only pushed as a prefilter that also keeps
/// every float, and the query runs again in memory.
fn select(dialect: Dialect, query: &Query, clauses: &mut Clauses) -> Result<Pushed> {
	let mut predicates = Vec::new();
	let mut params = Vec::new();
	let mut exact = true;

	for field in query.compile()? {
		let column = escape::identifier(&field.field)?;
		for constraint in &field.constraints {
			// comparing with NULL is never true in SQL
			if constraint.value == Value::Undefined {
				return Ok(Pushed::Nothing);
			}
			let placeholder = dialect.placeholder(clauses.params.len() + params.len() + 1);
			let predicate = format!("{column} {} {placeholder}", constraint.operator.as_sql());

			match constraint.operator {
				Operator::Like => {
					let Some(guard) = dialect.real_guard(&column) else {
						return Ok(Pushed::Nothing);
					};
					predicates.push(format!("({predicate} OR {guard})"));
					params.push(Value::Utf8(constraint.value.to_key().into_owned()));
					exact = false;
				}
				_ => {
					predicates.push(predicate);
					params.push(constraint.value.clone());
				}
			}
		}
	}

	clauses.wheres.append(&mut predicates);
	clauses.params.append(&mut params);
	Ok(if exact { Pushed::All } else { Pushed::Prefilter })
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use jsql_algebra::{Aggregate, Projection};

	use super::*;

	fn sqlite(operations: &[Operation]) -> Compiled {
		compile(Some("persons"), operations, &CompilerOptions::default()).unwrap()
	}

	fn born(condition: &str) -> Operation {
		Operation::Select(Query::new().with("Born", condition))
	}

	#[test]
	fn test_empty_pipeline() {
		let compiled = sqlite(&[]);
		assert_eq!(compiled.sql, "SELECT * FROM \"persons\" ORDER BY rowid ASC");
		assert_eq!(compiled.consumed, 0);
	}

	#[test]
	fn test_select_and_order() {
		let compiled = sqlite(&[born("< 1500"), Operation::Order(vec!["Born".into()])]);
		assert_eq!(
			compiled.sql,
			"SELECT * FROM \"persons\" WHERE \"Born\" < ?1 ORDER BY \"Born\" ASC, rowid ASC"
		);
		assert_eq!(compiled.params, vec![Value::int8(1500)]);
		assert_eq!(compiled.consumed, 2);
		assert_eq!(compiled.output, Output::Rows);
	}

	#[test]
	fn test_constraints_are_bound() {
		let query = Query::new().with("Name", vec!["!O'Brien", "Ada"]).with("Id", "!=3");
		let compiled = sqlite(&[Operation::Select(query), born(">=2.5")]);
		assert_eq!(
			compiled.sql,
			"SELECT * FROM \"persons\" WHERE \"Name\" <> ?1 AND \"Name\" = ?2 AND \"Id\" <> ?3 AND \"Born\" >= ?4 ORDER BY rowid ASC"
		);
		assert_eq!(
			compiled.params,
			vec![Value::utf8("O'Brien"), Value::utf8("Ada"), Value::int8(3), Value::float8(2.5)]
		);
		assert_eq!(compiled.consumed, 2);
	}

	#[test]
	fn test_like_is_a_prefilter() {
		let query = Query::new().with("Name", "~%a%").with("Id", "<3");
		let operations = [born(">1"), Operation::Select(query), Operation::Order(vec!["Id".into()])];
		let compiled = sqlite(&operations);
		assert_eq!(
			compiled.sql,
			"SELECT * FROM \"persons\" WHERE \"Born\" > ?1 AND (\"Name\" LIKE ?2 OR typeof(\"Name\") = 'real') AND \"Id\" < ?3 ORDER BY rowid ASC"
		);
		assert_eq!(compiled.params, vec![Value::int8(1), Value::utf8("%a%"), Value::int8(3)]);
		// the like query and everything after it run in memory
		assert_eq!(compiled.consumed, 1);

		// numeric patterns match the canonical text of the value
		let compiled = sqlite(&[Operation::Select(Query::new().with("F", "~2"))]);
		assert_eq!(compiled.params, vec![Value::utf8("2")]);
		assert_eq!(compiled.consumed, 0);

		let options = CompilerOptions::new(Dialect::Postgres);
		let operations = [Operation::Select(Query::new().with("Name", "~a%"))];
		let compiled = compile(Some("persons"), &operations, &options).unwrap();
		assert_eq!(compiled.sql, "SELECT * FROM \"persons\"");
		assert!(compiled.params.is_empty());
	}

	#[test]
	fn test_invalid_operator_fails_before_sending() {
		let err = compile(Some("persons"), &[born("=>3")], &CompilerOptions::default()).unwrap_err();
		assert!(matches!(err, Error::InvalidOperator { .. }));

		// also when the select would have run in memory
		let operations = [Operation::Limit(1), born("<>3")];
		let err = compile(Some("persons"), &operations, &CompilerOptions::default()).unwrap_err();
		assert!(matches!(err, Error::InvalidOperator { .. }));
	}

	#[test]
	fn test_invalid_identifier() {
		let err = compile(Some("persons; --"), &[], &CompilerOptions::default()).unwrap_err();
		assert!(matches!(err, Error::InvalidIdentifier(_)));

		let query = Operation::Select(Query::new().with("a\"b", 1));
		let err = compile(Some("persons"), &[query], &CompilerOptions::default()).unwrap_err();
		assert!(matches!(err, Error::InvalidIdentifier(_)));
	}

	#[test]
	fn test_missing_collection() {
		let err = compile(None, &[], &CompilerOptions::default()).unwrap_err();
		assert!(matches!(err, Error::MissingCollection));
	}

	#[test]
	fn test_window_in_append_order() {
		let compiled = sqlite(&[Operation::Offset(2), Operation::Limit(1)]);
		assert!(compiled.sql.ends_with("LIMIT 1 OFFSET 2"));

		let compiled = sqlite(&[Operation::Limit(3), Operation::Offset(1)]);
		assert!(compiled.sql.ends_with("LIMIT 2 OFFSET 1"));

		let compiled = sqlite(&[Operation::Limit(1), Operation::Offset(2)]);
		assert!(compiled.sql.ends_with("LIMIT 0 OFFSET 2"));

		let compiled = sqlite(&[Operation::Offset(1)]);
		assert!(compiled.sql.ends_with("LIMIT -1 OFFSET 1"));
	}

	#[test]
	fn test_no_reordering_across_window() {
		let compiled = sqlite(&[Operation::Limit(2), Operation::Order(vec!["Born".into()])]);
		assert_eq!(compiled.consumed, 1);
		assert_eq!(compiled.sql, "SELECT * FROM \"persons\" ORDER BY rowid ASC LIMIT 2");

		let compiled = sqlite(&[Operation::Limit(2), born("<1500")]);
		assert_eq!(compiled.consumed, 1);
	}

	#[test]
	fn test_successive_orders_prepend() {
		let compiled = sqlite(&[Operation::Order(vec!["a".into()]), Operation::Desc(vec!["b".into(), "c".into()])]);
		assert_eq!(
			compiled.sql,
			"SELECT * FROM \"persons\" ORDER BY \"b\" DESC, \"c\" DESC, \"a\" ASC, rowid ASC"
		);
	}

	#[test]
	fn test_count_and_aggregates() {
		let compiled = sqlite(&[born(">1000"), Operation::Count(None)]);
		assert_eq!(compiled.sql, "SELECT COUNT(*) AS \"value\" FROM \"persons\" WHERE \"Born\" > ?1");
		assert_eq!(compiled.output, Output::Scalar);
		assert_eq!(compiled.consumed, 2);

		let compiled = sqlite(&[Operation::Aggregate(Aggregate::Max, "Born".into()), Operation::Limit(1)]);
		assert_eq!(compiled.sql, "SELECT MAX(\"Born\") AS \"value\" FROM \"persons\"");
		assert_eq!(compiled.consumed, 1);

		// a counted field must be owned, which SQL cannot tell from NULL
		let compiled = sqlite(&[Operation::Count(Some("a".into()))]);
		assert_eq!(compiled.consumed, 0);

		let compiled = sqlite(&[Operation::Limit(1), Operation::Count(None)]);
		assert_eq!(compiled.consumed, 1);
	}

	#[test]
	fn test_sum_and_avg_run_in_memory() {
		// SQL sums text as zero where memory skips it
		for kind in [Aggregate::Sum, Aggregate::Avg] {
			let compiled = sqlite(&[born(">1"), Operation::Aggregate(kind, "Born".into())]);
			assert_eq!(compiled.output, Output::Rows);
			assert_eq!(compiled.consumed, 1);
		}

		let compiled = sqlite(&[Operation::Aggregate(Aggregate::Min, "Born".into())]);
		assert_eq!(compiled.sql, "SELECT MIN(\"Born\") AS \"value\" FROM \"persons\"");
		assert_eq!(compiled.output, Output::Scalar);

		let compiled = sqlite(&[Operation::Order(vec!["Id".into()]), Operation::Aggregate(Aggregate::Max, "Born".into())]);
		assert_eq!(compiled.output, Output::Rows);
		assert_eq!(compiled.consumed, 1);
	}

	#[test]
	fn test_distinct_runs_in_memory() {
		// the in-memory key depends on the first record's fields, which a
		// statement cannot know
		let compiled = sqlite(&[born(">1"), Operation::Distinct(None), Operation::Order(vec!["Born".into()])]);
		assert_eq!(compiled.sql, "SELECT * FROM \"persons\" WHERE \"Born\" > ?1 ORDER BY rowid ASC");
		assert_eq!(compiled.consumed, 1);

		let compiled = sqlite(&[Operation::Distinct(Some(vec!["Born".into()]))]);
		assert_eq!(compiled.consumed, 0);
	}

	#[test]
	fn test_stops_at_untranslatable() {
		let operations = [
			born("<1500"),
			Operation::Filter(Arc::new(|_| true)),
			Operation::Order(vec!["Born".into()]),
		];
		assert_eq!(sqlite(&operations).consumed, 1);

		let operations = [Operation::Projection(Projection::fields(["Born"])), born("<1500")];
		assert_eq!(sqlite(&operations).consumed, 0);

		let operations = [Operation::Order(vec!["Id".into()]), Operation::Row, Operation::Limit(1)];
		assert_eq!(sqlite(&operations).consumed, 1);
	}

	#[test]
	fn test_null_condition_is_left_to_memory() {
		let operation = Operation::Select(Query::new().with("a", Value::Undefined));
		assert_eq!(sqlite(&[operation]).consumed, 0);
	}

	#[test]
	fn test_postgres() {
		let options = CompilerOptions::new(Dialect::Postgres);
		let query = Query::new().with("Path", "C:\\tmp");
		let operations = [Operation::Select(query), Operation::Desc(vec!["Path".into()]), Operation::Offset(5)];
		let compiled = compile(Some("files"), &operations, &options).unwrap();
		assert_eq!(
			compiled.sql,
			"SELECT * FROM \"files\" WHERE \"Path\" = $1 ORDER BY \"Path\" DESC NULLS LAST OFFSET 5"
		);
		assert_eq!(compiled.params, vec![Value::utf8("C:\\tmp")]);
	}
}
