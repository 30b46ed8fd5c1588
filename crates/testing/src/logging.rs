// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_sub_tracing::TracingBuilder;
use tracing::Level;

/// Debug-level logging through the test harness. Safe to call from every
/// test; only the first call installs anything.
pub fn init() {
	let _ = TracingBuilder::new().level(Level::DEBUG).with_target(true).test_writer(true).init();
}
