// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Polling in place of fixed sleeps.

use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::trace;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Polls `condition` every `poll_interval` until it holds.
///
/// # Panics
/// When `condition` still does not hold after `timeout`.
pub async fn wait_for_condition<F>(condition: F, timeout: Duration, poll_interval: Duration, message: &str)
where
	F: Fn() -> bool,
{
	let start = Instant::now();
	let mut polls = 0u64;

	while !condition() {
		if start.elapsed() > timeout {
			panic!("timeout after {timeout:?} ({polls} polls): {message}");
		}
		polls += 1;
		sleep(poll_interval).await;
	}
	trace!(polls, elapsed = ?start.elapsed(), message, "condition met");
}

pub async fn wait_for<F>(condition: F, message: &str)
where
	F: Fn() -> bool,
{
	wait_for_condition(condition, DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL, message).await;
}
