// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Debug, Formatter};

use jsql_algebra::{Aggregate, Comparator, Predicate, Projection, Query};

use crate::Cursor;

/// The other side of a set operation. It is fetched, and awaited, when the
/// operation runs.
pub struct Operand(Box<dyn Cursor>);

impl Operand {
	pub fn new(cursor: Box<dyn Cursor>) -> Self {
		Self(cursor)
	}

	pub fn cursor(&self) -> &dyn Cursor {
		self.0.as_ref()
	}

	pub fn cursor_mut(&mut self) -> &mut dyn Cursor {
		self.0.as_mut()
	}

	pub fn into_inner(self) -> Box<dyn Cursor> {
		self.0
	}
}

impl<C: Cursor + 'static> From<C> for Operand {
	fn from(cursor: C) -> Self {
		Self(Box::new(cursor))
	}
}

impl From<Box<dyn Cursor>> for Operand {
	fn from(cursor: Box<dyn Cursor>) -> Self {
		Self(cursor)
	}
}

impl Debug for Operand {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Operand")
			.field("backend", &self.0.backend())
			.field("id", &self.0.id())
			.field("collection", &self.0.collection())
			.finish()
	}
}

/// One pending step of a pipeline.
pub enum Operation {
	Select(Query),
	Filter(Predicate),
	Projection(Projection),
	Distinct(Option<Vec<String>>),
	Find(Predicate),
	Sort(Comparator),
	Order(Vec<String>),
	Desc(Vec<String>),
	Limit(usize),
	Offset(usize),
	Count(Option<String>),
	Aggregate(Aggregate, String),
	Row,
	Col(Option<String>),
	One,
	Union(Operand),
	Intersection(Operand),
	Difference(Operand),
	Complement(Operand),
}

impl Operation {
	pub fn name(&self) -> &'static str {
		match self {
			Operation::Select(_) => "select",
			Operation::Filter(_) => "filter",
			Operation::Projection(_) => "projection",
			Operation::Distinct(_) => "distinct",
			Operation::Find(_) => "find",
			Operation::Sort(_) => "sort",
			Operation::Order(_) => "order",
			Operation::Desc(_) => "desc",
			Operation::Limit(_) => "limit",
			Operation::Offset(_) => "offset",
			Operation::Count(_) => "count",
			Operation::Aggregate(kind, _) => kind.name(),
			Operation::Row => "row",
			Operation::Col(_) => "col",
			Operation::One => "one",
			Operation::Union(_) => "union",
			Operation::Intersection(_) => "intersection",
			Operation::Difference(_) => "difference",
			Operation::Complement(_) => "complement",
		}
	}

	/// Operations carrying closures, which only the local algebra can run.
	pub fn is_opaque(&self) -> bool {
		match self {
			Operation::Filter(_) | Operation::Find(_) | Operation::Sort(_) => true,
			Operation::Projection(Projection::Mapping(mapping)) => mapping
				.values()
				.any(|m| m.transforms.iter().any(|t| matches!(t, jsql_algebra::Transform::Custom(_)))),
			_ => false,
		}
	}
}

impl Debug for Operation {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Operation::Select(query) => f.debug_tuple("Select").field(query).finish(),
			Operation::Filter(_) => f.write_str("Filter(<predicate>)"),
			Operation::Projection(projection) => f.debug_tuple("Projection").field(projection).finish(),
			Operation::Distinct(fields) => f.debug_tuple("Distinct").field(fields).finish(),
			Operation::Find(_) => f.write_str("Find(<predicate>)"),
			Operation::Sort(_) => f.write_str("Sort(<comparator>)"),
			Operation::Order(fields) => f.debug_tuple("Order").field(fields).finish(),
			Operation::Desc(fields) => f.debug_tuple("Desc").field(fields).finish(),
			Operation::Limit(n) => f.debug_tuple("Limit").field(n).finish(),
			Operation::Offset(n) => f.debug_tuple("Offset").field(n).finish(),
			Operation::Count(field) => f.debug_tuple("Count").field(field).finish(),
			Operation::Aggregate(kind, field) => f.debug_tuple("Aggregate").field(kind).field(field).finish(),
			Operation::Row => f.write_str("Row"),
			Operation::Col(field) => f.debug_tuple("Col").field(field).finish(),
			Operation::One => f.write_str("One"),
			Operation::Union(operand) => f.debug_tuple("Union").field(operand).finish(),
			Operation::Intersection(operand) => f.debug_tuple("Intersection").field(operand).finish(),
			Operation::Difference(operand) => f.debug_tuple("Difference").field(operand).finish(),
			Operation::Complement(operand) => f.debug_tuple("Complement").field(operand).finish(),
		}
	}
}
