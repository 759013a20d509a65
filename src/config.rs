use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::network::DEFAULT_API_BASE_URL;
use crate::pagination::DEFAULT_PAGE_SIZE;

const LOCAL_CONFIG_NAME: &str = "artic.toml";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    /// Submitting a page size also selects that many leading rows.
    pub preselect_on_resize: bool,
    pub log_file: Option<String>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: 15,
            preselect_on_resize: true,
            log_file: Some("~/.local/state/artic-table/artic-table.log".to_string()),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads defaults, the user config, a local `artic.toml` and `ARTIC_*`
    /// environment variables, in that order.
    pub fn new() -> Result<Self, ConfigError> {
        let mut files = Vec::new();
        if let Some(path) = get_user_config_path() {
            files.push(path);
        }
        files.push(PathBuf::from(LOCAL_CONFIG_NAME));
        Self::load(&files, true)
    }

    /// Layers the given files (all optional) over the defaults.
    pub fn load(files: &[PathBuf], with_env: bool) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("page_size", defaults.page_size as u64)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default("preselect_on_resize", defaults.preselect_on_resize)?
            .set_default("log_file", defaults.log_file)?
            .set_default("log_level", defaults.log_level)?;

        for path in files {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }
        if with_env {
            builder = builder.add_source(Environment::with_prefix("ARTIC").try_parsing(true));
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Message("page_size must be greater than zero".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Message("api_base_url must not be empty".into()));
        }
        Ok(())
    }

    /// Log file path with `~` and environment variables expanded.
    pub fn expanded_log_file(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| {
                let expanded = shellexpand::full(p)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| p.to_string());
                PathBuf::from(expanded)
            })
    }
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("artic-table");
    path.push(LOCAL_CONFIG_NAME);
    Some(path)
}

/// Writes the defaults to `path` unless a file is already there.
/// Returns whether a file was created.
pub fn seed_user_config(path: &Path) -> Result<bool, anyhow::Error> {
    if path.exists() {
        return Ok(false);
    }
    write_default_config(path)?;
    Ok(true)
}

pub fn write_default_config(path: &Path) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(&Settings::default())?;
    fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_files() {
        let settings = Settings::load(&[], false).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("user.toml");
        let local = dir.path().join("local.toml");
        fs::write(&user, "page_size = 20\nlog_level = \"debug\"\n").unwrap();
        fs::write(&local, "page_size = 8\npreselect_on_resize = false\n").unwrap();

        let missing = dir.path().join("missing.toml");
        let settings = Settings::load(&[user, local, missing], false).unwrap();
        assert_eq!(settings.page_size, 8);
        assert_eq!(settings.log_level, "debug");
        assert!(!settings.preselect_on_resize);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("artic.toml");
        fs::write(&file, "page_size = 0\n").unwrap();

        let err = Settings::load(&[file], false).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_written_default_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested").join("artic.toml");
        write_default_config(&file).unwrap();

        let settings = Settings::load(&[file], false).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_seed_user_config_only_once() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("artic-table").join("artic.toml");

        assert!(seed_user_config(&file).unwrap());
        fs::write(&file, "page_size = 30\n").unwrap();
        assert!(!seed_user_config(&file).unwrap());

        let settings = Settings::load(&[file], false).unwrap();
        assert_eq!(settings.page_size, 30);
    }

    #[test]
    fn test_seed_user_config_reports_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        assert!(seed_user_config(&blocker.join("artic.toml")).is_err());
    }

    #[test]
    fn test_expanded_log_file() {
        let settings = Settings {
            log_file: Some("/tmp/artic.log".into()),
            ..Settings::default()
        };
        assert_eq!(settings.expanded_log_file(), Some(PathBuf::from("/tmp/artic.log")));

        let settings = Settings {
            log_file: Some("  ".into()),
            ..Settings::default()
        };
        assert_eq!(settings.expanded_log_file(), None);
    }
}
