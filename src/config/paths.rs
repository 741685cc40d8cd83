//! Path management for gnucash-reports
//!
//! Provides XDG-compliant path resolution for the settings file, plus the
//! default location reports are written to.
//!
//! ## Path Resolution Order
//!
//! 1. `GNUCASH_REPORTS_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/gnucash-reports` or `~/.config/gnucash-reports`
//! 3. Windows: `%APPDATA%\gnucash-reports`

use directories::{BaseDirs, UserDirs};
use std::path::{Path, PathBuf};

use crate::error::ReportError;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "GNUCASH_REPORTS_DIR";

const APP_DIR_NAME: &str = "gnucash-reports";

/// Manages all paths used by gnucash-reports
#[derive(Debug, Clone)]
pub struct ReportPaths {
    /// Directory holding config.json
    base_dir: PathBuf,
}

impl ReportPaths {
    /// Create a new ReportPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, ReportError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ReportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/gnucash-reports/ or equivalent)
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), ReportError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ReportError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// `~/GnuCash/Reports/`, where reports go unless configured otherwise
pub fn default_reports_dir() -> Result<PathBuf, ReportError> {
    let dirs = UserDirs::new()
        .ok_or_else(|| ReportError::Config("Could not determine home directory".into()))?;
    Ok(dirs.home_dir().join("GnuCash").join("Reports"))
}

/// Resolve the default configuration directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ReportError> {
    // Unix (Linux/macOS): XDG_CONFIG_HOME if set, otherwise ~/.config
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !config_home.is_empty() {
            return Ok(PathBuf::from(config_home).join(APP_DIR_NAME));
        }
    }
    let base = BaseDirs::new()
        .ok_or_else(|| ReportError::Config("Could not determine home directory".into()))?;
    Ok(base.home_dir().join(".config").join(APP_DIR_NAME))
}

/// Resolve the default configuration directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ReportError> {
    let base = BaseDirs::new()
        .ok_or_else(|| ReportError::Config("Could not determine APPDATA directory".into()))?;
    Ok(base.config_dir().join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(CONFIG_DIR_ENV, custom_path);
        let paths = ReportPaths::new().unwrap();
        env::remove_var(CONFIG_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let paths = ReportPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_default_reports_dir_ends_with_gnucash_reports() {
        if let Ok(dir) = default_reports_dir() {
            assert!(dir.ends_with("GnuCash/Reports"));
        }
    }
}
