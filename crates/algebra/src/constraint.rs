// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The constraint language.
//!
//! A condition is a string with an optional operator prefix:
//!
//! | condition | meaning            |
//! |-----------|--------------------|
//! | `=v`      | equals `v`         |
//! | `!v`      | not equals `v`     |
//! | `!=v`     | not equals `v`     |
//! | `<v`      | less than `v`      |
//! | `<=v`     | at most `v`        |
//! | `>v`      | greater than `v`   |
//! | `>=v`     | at least `v`       |
//! | `~v`      | `LIKE` pattern `v` |
//! | `v`       | equals `v`         |
//!
//! `v` becomes a number when it parses completely as one.

use std::{
	cmp::Ordering,
	fmt::{self, Display, Formatter},
};

use jsql_type::{Error, Result, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
	Eq,
	Ne,
	Lt,
	Le,
	Gt,
	Ge,
	Like,
}

impl Operator {
	pub fn as_sql(&self) -> &'static str {
		match self {
			Operator::Eq => "=",
			Operator::Ne => "<>",
			Operator::Lt => "<",
			Operator::Le => "<=",
			Operator::Gt => ">",
			Operator::Ge => ">=",
			Operator::Like => "LIKE",
		}
	}
}

impl Display for Operator {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Operator::Eq => "=",
			Operator::Ne => "!=",
			Operator::Lt => "<",
			Operator::Le => "<=",
			Operator::Gt => ">",
			Operator::Ge => ">=",
			Operator::Like => "LIKE",
		})
	}
}

// longest prefixes first
const PREFIXES: [(&str, Operator); 8] = [
	("<=", Operator::Le),
	(">=", Operator::Ge),
	("!=", Operator::Ne),
	("=", Operator::Eq),
	("!", Operator::Ne),
	("<", Operator::Lt),
	(">", Operator::Gt),
	("~", Operator::Like),
];

const OPERATOR_CHARS: [char; 5] = ['=', '!', '<', '>', '~'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
	pub operator: Operator,
	pub value: Value,
}

impl Constraint {
	pub fn new(operator: Operator, value: impl Into<Value>) -> Self {
		Self {
			operator,
			value: value.into(),
		}
	}

	/// Parses one condition for `field`.
	///
	/// Non-text conditions are implicit equality. A leftover operator
	/// character after the prefix (`==1`, `<>1`, `=>1`) is rejected rather
	/// than compared as text.
	pub fn parse(field: &str, condition: &Value) -> Result<Self> {
		let text = match condition {
			Value::Utf8(text) => text.as_str(),
			other => return Ok(Self::new(Operator::Eq, other.clone())),
		};

		let trimmed = text.trim_start();
		let (operator, rest) = PREFIXES
			.iter()
			.find_map(|(prefix, operator)| trimmed.strip_prefix(prefix).map(|rest| (*operator, rest)))
			.unwrap_or((Operator::Eq, trimmed));

		let rest = rest.trim();
		if rest.starts_with(OPERATOR_CHARS) {
			return Err(Error::InvalidOperator {
				field: field.to_string(),
				condition: text.to_string(),
			});
		}

		let value = match operator {
			Operator::Like => Value::utf8(rest),
			_ => Value::parse_number(rest).unwrap_or_else(|| Value::utf8(rest)),
		};

		Ok(Self::new(operator, value))
	}

	/// Tests a field value. A missing or undefined field never matches,
	/// mirroring SQL's treatment of NULL.
	pub fn matches(&self, value: Option<&Value>) -> bool {
		let value = match value {
			None | Some(Value::Undefined) => return false,
			Some(value) => value,
		};

		match self.operator {
			Operator::Like => like(&value.to_key(), &self.value.to_key()),
			Operator::Eq => value.compare(&self.value) == Ordering::Equal,
			Operator::Ne => value.compare(&self.value) != Ordering::Equal,
			Operator::Lt => value.compare(&self.value) == Ordering::Less,
			Operator::Le => value.compare(&self.value) != Ordering::Greater,
			Operator::Gt => value.compare(&self.value) == Ordering::Greater,
			Operator::Ge => value.compare(&self.value) != Ordering::Less,
		}
	}
}

/// SQL `LIKE`: `%` matches any run, `_` one character. ASCII letters match
/// case-insensitively, as in SQLite.
pub fn like(text: &str, pattern: &str) -> bool {
	let text: Vec<char> = text.chars().collect();
	let pattern: Vec<char> = pattern.chars().collect();

	let (mut t, mut p) = (0, 0);
	let mut backtrack: Option<(usize, usize)> = None;

	while t < text.len() {
		if p < pattern.len() && pattern[p] == '%' {
			backtrack = Some((p, t));
			p += 1;
		} else if p < pattern.len() && (pattern[p] == '_' || pattern[p].eq_ignore_ascii_case(&text[t])) {
			p += 1;
			t += 1;
		} else if let Some((star, mark)) = backtrack {
			p = star + 1;
			t = mark + 1;
			backtrack = Some((star, mark + 1));
		} else {
			return false;
		}
	}

	pattern[p..].iter().all(|c| *c == '%')
}
