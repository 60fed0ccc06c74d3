use crate::config::ConfigError;
use std::{collections::HashSet, fs, path::Path};

/// Read the skip-list: one folder name per line, blanks ignored,
/// duplicates collapse into the set.
pub fn load(path: &Path) -> Result<HashSet<String>, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|_| ConfigError::SkipListMissing(path.to_path_buf()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
