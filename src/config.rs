use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("skip-list file not found: {}", .0.display())]
    SkipListMissing(PathBuf),
    #[error("downloads directory not found: {}", .0.display())]
    DownloadsRootMissing(PathBuf),
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),
}

/// Everything the sweep needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub downloads_root: PathBuf,
    pub skip_list: PathBuf,
    pub assume_yes: bool,
    pub dry_run: bool,
}

impl Config {
    /// Both faults here are fatal: without the skip-list we cannot know
    /// what to exclude, and without the downloads root there is nothing
    /// to clean.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.skip_list.is_file() {
            return Err(ConfigError::SkipListMissing(self.skip_list.clone()));
        }
        if !self.downloads_root.is_dir() {
            return Err(ConfigError::DownloadsRootMissing(self.downloads_root.clone()));
        }
        Ok(())
    }
}
