//! Config directory resolution.

use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Maps an application name to the directory its data lives in.
pub trait PathResolver {
    fn resolve_config_dir(&self, app_name: &str) -> Result<PathBuf>;
}

/// OS-conventional per-user config directory.
///
/// `~/.config/<app>` on Linux, `~/Library/Application Support/<app>` on macOS,
/// `%APPDATA%\<app>` on Windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformResolver;

impl PathResolver for PlatformResolver {
    fn resolve_config_dir(&self, app_name: &str) -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(app_name))
            .ok_or(StoreError::NoConfigDir)
    }
}

/// Always resolves to the same directory, ignoring the app name.
#[derive(Debug, Clone)]
pub struct FixedDir(PathBuf);

impl FixedDir {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self(dir.as_ref().to_path_buf())
    }
}

impl PathResolver for FixedDir {
    fn resolve_config_dir(&self, _app_name: &str) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}
