// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{cmp::Ordering, sync::Arc};

use jsql_algebra::{Aggregate, Projection, Query};
use jsql_type::Record;

use crate::{Cursor, Operand, Operation};

/// One field name or a list of them; a single name becomes a one-element
/// list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields(pub Vec<String>);

impl From<&str> for Fields {
	fn from(field: &str) -> Self {
		Self(vec![field.to_string()])
	}
}

impl From<String> for Fields {
	fn from(field: String) -> Self {
		Self(vec![field])
	}
}

impl From<Vec<String>> for Fields {
	fn from(fields: Vec<String>) -> Self {
		Self(fields)
	}
}

impl From<Vec<&str>> for Fields {
	fn from(fields: Vec<&str>) -> Self {
		Self(fields.into_iter().map(str::to_string).collect())
	}
}

impl From<&[&str]> for Fields {
	fn from(fields: &[&str]) -> Self {
		Self(fields.iter().map(|f| f.to_string()).collect())
	}
}

impl<const N: usize> From<[&str; N]> for Fields {
	fn from(fields: [&str; N]) -> Self {
		Self(fields.iter().map(|f| f.to_string()).collect())
	}
}

/// Chainable pipeline construction, available on every cursor including
/// `dyn Cursor`. Each call appends exactly one operation and returns the
/// same cursor.
pub trait CursorBuilder: Cursor {
	fn select(&mut self, query: Query) -> &mut Self {
		self.push(Operation::Select(query));
		self
	}

	fn filter(&mut self, predicate: impl Fn(&Record) -> bool + Send + Sync + 'static) -> &mut Self {
		self.push(Operation::Filter(Arc::new(predicate)));
		self
	}

	fn find(&mut self, predicate: impl Fn(&Record) -> bool + Send + Sync + 'static) -> &mut Self {
		self.push(Operation::Find(Arc::new(predicate)));
		self
	}

	fn projection(&mut self, projection: impl Into<ProjectionArg>) -> &mut Self {
		self.push(Operation::Projection(projection.into().0));
		self
	}

	fn distinct(&mut self) -> &mut Self {
		self.push(Operation::Distinct(None));
		self
	}

	fn distinct_by(&mut self, fields: impl Into<Fields>) -> &mut Self {
		self.push(Operation::Distinct(Some(fields.into().0)));
		self
	}

	fn sort(&mut self, comparator: impl Fn(&Record, &Record) -> Ordering + Send + Sync + 'static) -> &mut Self {
		self.push(Operation::Sort(Arc::new(comparator)));
		self
	}

	fn order(&mut self, fields: impl Into<Fields>) -> &mut Self {
		self.push(Operation::Order(fields.into().0));
		self
	}

	fn desc(&mut self, fields: impl Into<Fields>) -> &mut Self {
		self.push(Operation::Desc(fields.into().0));
		self
	}

	fn limit(&mut self, n: usize) -> &mut Self {
		self.push(Operation::Limit(n));
		self
	}

	fn offset(&mut self, n: usize) -> &mut Self {
		self.push(Operation::Offset(n));
		self
	}

	fn count(&mut self) -> &mut Self {
		self.push(Operation::Count(None));
		self
	}

	fn count_field(&mut self, field: impl Into<String>) -> &mut Self {
		self.push(Operation::Count(Some(field.into())));
		self
	}

	fn sum(&mut self, field: impl Into<String>) -> &mut Self {
		self.push(Operation::Aggregate(Aggregate::Sum, field.into()));
		self
	}

	fn avg(&mut self, field: impl Into<String>) -> &mut Self {
		self.push(Operation::Aggregate(Aggregate::Avg, field.into()));
		self
	}

	fn min(&mut self, field: impl Into<String>) -> &mut Self {
		self.push(Operation::Aggregate(Aggregate::Min, field.into()));
		self
	}

	fn max(&mut self, field: impl Into<String>) -> &mut Self {
		self.push(Operation::Aggregate(Aggregate::Max, field.into()));
		self
	}

	fn row(&mut self) -> &mut Self {
		self.push(Operation::Row);
		self
	}

	fn col(&mut self) -> &mut Self {
		self.push(Operation::Col(None));
		self
	}

	fn col_field(&mut self, field: impl Into<String>) -> &mut Self {
		self.push(Operation::Col(Some(field.into())));
		self
	}

	fn one(&mut self) -> &mut Self {
		self.push(Operation::One);
		self
	}

	fn union(&mut self, other: impl Into<Operand>) -> &mut Self {
		self.push(Operation::Union(other.into()));
		self
	}

	fn intersection(&mut self, other: impl Into<Operand>) -> &mut Self {
		self.push(Operation::Intersection(other.into()));
		self
	}

	fn difference(&mut self, other: impl Into<Operand>) -> &mut Self {
		self.push(Operation::Difference(other.into()));
		self
	}

	fn complement(&mut self, other: impl Into<Operand>) -> &mut Self {
		self.push(Operation::Complement(other.into()));
		self
	}
}

impl<C: Cursor + ?Sized> CursorBuilder for C {}

/// Either a field list or a full [`Projection`].
pub struct ProjectionArg(pub Projection);

impl From<Projection> for ProjectionArg {
	fn from(projection: Projection) -> Self {
		Self(projection)
	}
}

impl From<Fields> for ProjectionArg {
	fn from(fields: Fields) -> Self {
		Self(Projection::Fields(fields.0))
	}
}

impl From<&str> for ProjectionArg {
	fn from(field: &str) -> Self {
		Fields::from(field).into()
	}
}

impl From<Vec<&str>> for ProjectionArg {
	fn from(fields: Vec<&str>) -> Self {
		Fields::from(fields).into()
	}
}

impl From<Vec<String>> for ProjectionArg {
	fn from(fields: Vec<String>) -> Self {
		Fields::from(fields).into()
	}
}

impl<const N: usize> From<[&str; N]> for ProjectionArg {
	fn from(fields: [&str; N]) -> Self {
		Fields::from(fields).into()
	}
}
