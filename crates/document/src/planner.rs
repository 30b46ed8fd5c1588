// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_algebra::{Direction, FieldConstraints, Projection};
use jsql_core::Operation;

use crate::SortKey;

/// How far along the driver's fixed filter, sort, limit, project order the
/// pushed steps have come.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Phase {
	#[default]
	Filter,
	Sort,
	Limit,
	Project,
}

/// One step handed to the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Pushdown {
	Filter(Vec<FieldConstraints>),
	/// The complete sort, replacing any earlier one.
	Sort(Vec<SortKey>),
	/// The effective limit, replacing any earlier one.
	Limit(usize),
	Project(Vec<String>),
}

/// Decides, step by step, whether an appended operation can go to the
/// driver. Once a step is refused every later step is refused too, so the
/// pushed steps always form a prefix of the pipeline.
#[derive(Debug, Default)]
pub struct Planner {
	phase: Phase,
	sort: Vec<SortKey>,
	limit: Option<usize>,
	pushed: usize,
	stopped: bool,
}

impl Planner {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of leading steps pushed down so far.
	pub fn pushed(&self) -> usize {
		self.pushed
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn plan(&mut self, operation: &Operation) -> Option<Pushdown> {
		if self.stopped {
			return None;
		}

		let pushdown = match operation {
			Operation::Select(query) if self.phase == Phase::Filter => {
				query.compile().ok().map(Pushdown::Filter)
			}
			Operation::Order(fields) | Operation::Desc(fields) if self.phase <= Phase::Sort => {
				let direction = match operation {
					Operation::Desc(_) => Direction::Desc,
					_ => Direction::Asc,
				};
				// a later sort dominates, the earlier one breaks its ties
				let mut keys: Vec<SortKey> = fields.iter().map(|field| (field.clone(), direction)).collect();
				keys.extend(self.sort.iter().cloned());
				self.sort = keys.clone();
				self.phase = Phase::Sort;
				Some(Pushdown::Sort(keys))
			}
			Operation::Limit(n) if self.phase <= Phase::Limit => {
				let n = self.limit.map_or(*n, |limit| limit.min(*n));
				self.limit = Some(n);
				self.phase = Phase::Limit;
				Some(Pushdown::Limit(n))
			}
			Operation::Projection(Projection::Fields(fields)) if self.phase < Phase::Project => {
				self.phase = Phase::Project;
				Some(Pushdown::Project(fields.clone()))
			}
			_ => None,
		};

		match pushdown {
			Some(_) => self.pushed += 1,
			None => self.stopped = true,
		}
		pushdown
	}
}
