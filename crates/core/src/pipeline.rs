// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::Operation;

/// Pending operations of one cursor, in append order. Append order is
/// execution order; nothing here reorders.
#[derive(Debug, Default)]
pub struct Pipeline {
	operations: Vec<Operation>,
}

impl Pipeline {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, operation: Operation) {
		self.operations.push(operation);
	}

	pub fn len(&self) -> usize {
		self.operations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.operations.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Operation> {
		self.operations.iter()
	}

	/// Moves the operations out and leaves an empty pipeline behind.
	///
	/// Fetch calls this before doing anything else, so a pipeline is
	/// executed at most once and the cursor is immediately reusable.
	pub fn take(&mut self) -> Vec<Operation> {
		std::mem::take(&mut self.operations)
	}
}

impl From<Vec<Operation>> for Pipeline {
	fn from(operations: Vec<Operation>) -> Self {
		Self {
			operations,
		}
	}
}
