// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Installs the process-wide `tracing` subscriber.

mod builder;

pub use builder::{TracingBuilder, TracingConfigurator};
