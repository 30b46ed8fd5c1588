// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, fs, io, path::Path};

use uuid::Uuid;

/// Runs `f` with a fresh, uniquely named directory that is removed
/// afterwards, whatever `f` returns.
pub fn temp_dir<F>(f: F) -> io::Result<()>
where
	F: FnOnce(&Path) -> io::Result<()>,
{
	let path = env::temp_dir().join(format!("jsql-{}", Uuid::new_v4()));

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_removed_afterwards() {
		let mut seen = None;
		temp_dir(|dir| {
			fs::write(dir.join("file"), b"x")?;
			seen = Some(dir.to_path_buf());
			Ok(())
		})
		.unwrap();
		assert!(!seen.unwrap().exists());
	}
}
