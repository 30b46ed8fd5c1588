// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Keeps the first `n` items.
pub fn limit<T>(n: usize, mut items: Vec<T>) -> Vec<T> {
	items.truncate(n);
	items
}

/// Drops the first `n` items.
pub fn offset<T>(n: usize, mut items: Vec<T>) -> Vec<T> {
	if n >= items.len() {
		return Vec::new();
	}
	items.split_off(n)
}
