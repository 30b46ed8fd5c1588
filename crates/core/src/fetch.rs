// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	future::Future,
	sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	},
	time::Duration,
};

use jsql_type::{Error, Result, Stage};
use tokio::{sync::Notify, time::Instant};

/// A cancellation signal shared between the caller and a running fetch.
///
/// Clones share one flag. Cancelling is sticky: once set it stays set, and
/// every pending or later [`cancelled`](Self::cancelled) call resolves.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
	inner: Arc<TokenInner>,
}

#[derive(Debug, Default)]
struct TokenInner {
	cancelled: AtomicBool,
	notify: Notify,
}

impl CancellationToken {
	pub fn new() -> Self {
		Self::default()
	}

	/// Signal cancellation.
	pub fn cancel(&self) {
		self.inner.cancelled.store(true, Ordering::SeqCst);
		self.inner.notify.notify_waiters();
	}

	pub fn is_cancelled(&self) -> bool {
		self.inner.cancelled.load(Ordering::SeqCst)
	}

	/// Resolves once [`cancel`](Self::cancel) has been called.
	pub async fn cancelled(&self) {
		loop {
			let notified = self.inner.notify.notified();
			if self.is_cancelled() {
				return;
			}
			notified.await;
		}
	}
}

/// Options for one terminal fetch.
#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
	/// Upper bound for the whole fetch, both stages included.
	pub timeout: Option<Duration>,
	pub cancel: CancellationToken,
}

impl FetchOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn cancel(mut self, cancel: CancellationToken) -> Self {
		self.cancel = cancel;
		self
	}

	/// Starts the clock.
	pub fn start(self) -> FetchContext {
		FetchContext {
			deadline: self.timeout.map(|timeout| Instant::now() + timeout),
			cancel: self.cancel,
		}
	}
}

/// A running fetch: the deadline fixed at start and the caller's token.
#[derive(Clone, Debug)]
pub struct FetchContext {
	deadline: Option<Instant>,
	cancel: CancellationToken,
}

impl FetchContext {
	pub fn cancel_token(&self) -> &CancellationToken {
		&self.cancel
	}

	/// Options for a nested fetch (a set operation's operand) that shares
	/// this fetch's token and remaining time.
	pub fn nested(&self) -> FetchOptions {
		FetchOptions {
			timeout: self.deadline.map(|deadline| deadline.saturating_duration_since(Instant::now())),
			cancel: self.cancel.clone(),
		}
	}

	/// Fails fast if the fetch was cancelled or ran out of time.
	pub fn check(&self, stage: Stage) -> Result<()> {
		if self.cancel.is_cancelled() {
			return Err(Error::Cancelled {
				stage,
			});
		}
		if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
			return Err(Error::Timeout {
				stage,
			});
		}
		Ok(())
	}

	/// Runs one stage, abandoning it on cancellation or deadline. The
	/// future is dropped when abandoned; backends that hold external
	/// resources release them on drop.
	pub async fn guard<T>(&self, stage: Stage, future: impl Future<Output = Result<T>>) -> Result<T> {
		self.check(stage)?;

		let deadline = async {
			match self.deadline {
				Some(deadline) => tokio::time::sleep_until(deadline).await,
				None => std::future::pending().await,
			}
		};

		tokio::select! {
			result = future => result,
			_ = self.cancel.cancelled() => Err(Error::Cancelled { stage }),
			_ = deadline => Err(Error::Timeout { stage }),
		}
	}
}
