// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Identifier escaping. Table and column names are the only user input the
//! compiler splices into a statement; values travel as bound parameters.

use jsql_type::{Error, Result};

/// Double-quotes `name` after checking it against `[A-Za-z0-9_]+`.
pub fn identifier(name: &str) -> Result<String> {
	if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
		return Err(Error::InvalidIdentifier(name.to_string()));
	}
	Ok(format!("\"{name}\""))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_identifier() {
		assert_eq!(identifier("Born").unwrap(), "\"Born\"");
		assert_eq!(identifier("first_name2").unwrap(), "\"first_name2\"");

		for bad in ["", "a b", "a\"b", "x;DROP TABLE t", "naïve"] {
			assert!(matches!(identifier(bad), Err(Error::InvalidIdentifier(_))), "{bad}");
		}
	}
}
