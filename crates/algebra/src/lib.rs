// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Dataset algebra.
//!
//! Pure, synchronous transforms over an in-memory, ordered sequence of
//! records. Every cursor backend finishes its pipeline with these functions,
//! which makes this crate the behavioural reference for all of them.
//!
//! The constraint language used by `select` lives here as well, so that
//! in-memory filtering and SQL predicate construction parse conditions the
//! same way.

pub mod aggregate;
pub mod constraint;
pub mod distinct;
pub mod order;
pub mod projection;
pub mod query;
pub mod select;
pub mod set;
pub mod window;

pub use aggregate::{Aggregate, aggregate, col, count, one, row};
pub use constraint::{Constraint, Operator};
pub use distinct::{composite_key, distinct};
pub use order::{Comparator, Direction, order, sort};
pub use projection::{Mapping, Projection, Transform, project};
pub use query::{Condition, FieldConstraints, Query};
pub use select::{Predicate, filter, find, select};
pub use set::{complement, difference, intersection, union};
pub use window::{limit, offset};
