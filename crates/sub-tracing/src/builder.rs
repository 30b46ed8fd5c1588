// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use jsql_type::{Error, Result};
use tracing::{Level, debug, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Adjusts a builder before it is installed.
pub type TracingConfigurator = Box<dyn FnOnce(TracingBuilder) -> TracingBuilder + Send>;

/// Configures the subscriber. `RUST_LOG`, when set, takes precedence over
/// [`level`](Self::level); [`filter`](Self::filter) directives are added on
/// top of either.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	json: bool,
	with_target: bool,
	test_writer: bool,
	directives: Vec<String>,
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self {
			level: Level::INFO,
			json: false,
			with_target: true,
			test_writer: false,
			directives: Vec::new(),
		}
	}
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// One JSON object per event instead of human readable lines.
	pub fn json(mut self, json: bool) -> Self {
		self.json = json;
		self
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	/// Writes through the test harness so output is captured per test.
	pub fn test_writer(mut self, test_writer: bool) -> Self {
		self.test_writer = test_writer;
		self
	}

	/// Adds a directive such as `jsql_sql=trace`.
	pub fn filter(mut self, directive: impl Into<String>) -> Self {
		self.directives.push(directive.into());
		self
	}

	pub fn configure(self, configurator: TracingConfigurator) -> Self {
		configurator(self)
	}

	pub fn env_filter(&self) -> Result<EnvFilter> {
		let mut filter =
			EnvFilter::builder().with_default_directive(LevelFilter::from_level(self.level).into()).from_env_lossy();
		for directive in &self.directives {
			let directive =
				directive.parse().map_err(|e| Error::Config(format!("tracing directive {directive:?}: {e}")))?;
			filter = filter.add_directive(directive);
		}
		Ok(filter)
	}

	/// Installs the subscriber. Returns `false` when one was already
	/// installed, which leaves the existing one in place.
	pub fn init(self) -> Result<bool> {
		let filter = self.env_filter()?;

		let layer: Box<dyn Layer<Registry> + Send + Sync> = match (self.json, self.test_writer) {
			(true, true) => fmt::layer().json().with_target(self.with_target).with_test_writer().boxed(),
			(true, false) => fmt::layer().json().with_target(self.with_target).boxed(),
			(false, true) => fmt::layer().with_target(self.with_target).with_test_writer().boxed(),
			(false, false) => fmt::layer().with_target(self.with_target).boxed(),
		};

		let installed = tracing_subscriber::registry().with(layer).with(filter).try_init().is_ok();
		if installed {
			debug!(level = %self.level, json = self.json, "tracing initialised");
		}
		Ok(installed)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_directive() {
		let err = TracingBuilder::new().filter("jsql_sql=loud").env_filter().unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}

	#[test]
	fn test_configurator() {
		let builder = TracingBuilder::new().configure(Box::new(|b| b.level(Level::DEBUG).json(true)));
		assert_eq!(builder.level, Level::DEBUG);
		assert!(builder.json);
	}

	#[test]
	fn test_second_init_keeps_first() {
		TracingBuilder::new().test_writer(true).init().unwrap();
		assert!(!TracingBuilder::new().test_writer(true).init().unwrap());
	}
}
