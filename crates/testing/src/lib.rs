// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared test support: fixtures, temporary directories, waiting on
//! conditions and test logging.

pub mod fixture;
pub mod logging;
pub mod tempdir;
pub mod util;
