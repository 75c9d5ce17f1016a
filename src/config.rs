//! Store configuration.
//!
//! ```toml
//! app_name = "code-vista"
//! storage_dir = "/srv/vista"   # optional, bypasses the platform config dir
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StoreError};
use crate::storage::resolver::{FixedDir, PathResolver, PlatformResolver};

/// Application name used when none is configured.
pub const DEFAULT_APP_NAME: &str = "code-vista";

/// Environment variable that overrides the storage directory.
pub const STORAGE_DIR_ENV: &str = "CODE_VISTA_STORAGE_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory name under the per-user config dir.
    pub app_name: String,
    /// Explicit storage directory. Takes precedence over `app_name` resolution.
    pub storage_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            storage_dir: None,
        }
    }
}

impl StoreConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            storage_dir: None,
        }
    }

    /// Config that stores everything directly in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| StoreError::Config(format!("toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `CODE_VISTA_STORAGE_DIR` if set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(STORAGE_DIR_ENV) {
            if !dir.is_empty() {
                self.storage_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    /// The app name must be a single normal path component.
    pub fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.app_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(StoreError::Config(format!(
                "app_name must be a single directory name, got {:?}",
                self.app_name
            ))),
        }
    }

    /// Resolver matching this config.
    pub fn resolver(&self) -> Box<dyn PathResolver> {
        match &self.storage_dir {
            Some(dir) => Box::new(FixedDir::new(dir)),
            None => Box::new(PlatformResolver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_app_name() {
        let config = StoreConfig::default();
        assert_eq!(config.app_name, "code-vista");
        assert!(config.storage_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = StoreConfig::from_toml_str(
            r#"
app_name = "vista-dev"
storage_dir = "/tmp/vista"
"#,
        )
        .unwrap();
        assert_eq!(config.app_name, "vista-dev");
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/vista")));

        let resolved = config.resolver().resolve_config_dir(&config.app_name).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/vista"));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        assert_eq!(StoreConfig::from_toml_str("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = StoreConfig::from_toml_str("colour = \"blue\"").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_app_names() {
        for name in ["", "a/b", "..", "/abs"] {
            let err = StoreConfig::new(name).validate();
            assert!(err.is_err(), "{:?} should be rejected", name);
        }
    }
}
