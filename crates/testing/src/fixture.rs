// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_type::{Record, record};

/// Five philosophers, in insertion order.
pub fn persons() -> Vec<Record> {
	vec![
		record! { "Id" => 1, "Name" => "Plato", "Born" => 121 },
		record! { "Id" => 2, "Name" => "Turing", "Born" => 1923 },
		record! { "Id" => 3, "Name" => "Maimonides", "Born" => 1165 },
		record! { "Id" => 4, "Name" => "Wittgenstein", "Born" => 1893 },
		record! { "Id" => 5, "Name" => "Pascal", "Born" => 1596 },
	]
}

/// Records keyed `Id`, one per given id.
pub fn ids(ids: impl IntoIterator<Item = i64>) -> Vec<Record> {
	ids.into_iter().map(|id| record! { "Id" => id }).collect()
}
