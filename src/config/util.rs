//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find the config file by searching upward from the current directory.
///
/// An absolute `name` is checked directly. A relative one is looked up
/// in cwd first, then in each parent until the filesystem root.
///
/// # Example
/// ```text
/// /home/user/site/docs/       ← cwd
/// /home/user/site/pagewire.toml   ← found!
/// ```
pub fn find_config_file(name: &Path) -> Option<PathBuf> {
    if name.is_absolute() {
        return name.exists().then(|| name.to_path_buf());
    }

    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(name);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_file_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagewire.toml");
        std::fs::write(&path, "[connect]\n").unwrap();

        assert_eq!(find_config_file(&path), Some(path.clone()));

        let missing = dir.path().join("missing.toml");
        assert_eq!(find_config_file(&missing), None);
    }
}
