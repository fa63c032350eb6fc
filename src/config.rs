//! Configuration management for urlsweep.
//!
//! Settings come from a `urlsweep.toml` file (explicit `--config` path or the
//! current directory), overridden by `--target` and the `URLSWEEP_DATABASE`
//! environment variable.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

/// Default config file name looked up in the current directory.
const CONFIG_FILE_NAME: &str = "urlsweep.toml";

/// Default database file name inside the data directory.
const DATABASE_FILE_NAME: &str = "urlsweep.db";

/// Options collected from global CLI flags.
#[derive(Debug, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Target directory or `.db` file (overrides config file).
    pub target: Option<PathBuf>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the database and any auxiliary files.
    pub data_dir: PathBuf,
    /// Explicit database location, if configured.
    database: Option<String>,
}

/// On-disk shape of `urlsweep.toml`.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    data_dir: Option<String>,
    database: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from("."),
            database: None,
        }
    }
}

impl Settings {
    /// The database URL (a SQLite file path) this run operates on.
    pub fn database_url(&self) -> String {
        match &self.database {
            Some(db) => db.clone(),
            None => self.data_dir.join(DATABASE_FILE_NAME).display().to_string(),
        }
    }

    /// Create the data directory if it does not exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }
}

/// Load settings, applying CLI and environment overrides.
pub fn load_settings(options: LoadOptions) -> Settings {
    let file = read_settings_file(options.config_path.as_deref());

    let mut settings = Settings {
        data_dir: file
            .data_dir
            .as_deref()
            .map(expand_path)
            .unwrap_or_else(|| PathBuf::from(".")),
        database: file.database.as_deref().map(|s| expand(s)),
    };

    // --target: a .db file selects the database directly, anything else is
    // treated as the data directory.
    if let Some(target) = options.target {
        if target.extension().is_some_and(|ext| ext == "db") {
            settings.data_dir = target
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            settings.database = Some(target.display().to_string());
        } else {
            settings.data_dir = target;
            settings.database = None;
        }
    }

    if let Ok(db) = std::env::var("URLSWEEP_DATABASE") {
        if !db.is_empty() {
            settings.database = Some(db);
        }
    }

    settings
}

fn read_settings_file(explicit: Option<&std::path::Path>) -> SettingsFile {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            // Missing default config is normal; an explicit one should exist.
            if explicit.is_some() {
                warn!("cannot read config file {}: {}", path.display(), e);
            }
            return SettingsFile::default();
        }
    };

    match toml::from_str(&text) {
        Ok(file) => file,
        Err(e) => {
            warn!("ignoring malformed config file {}: {}", path.display(), e);
            SettingsFile::default()
        }
    }
}

fn expand(s: &str) -> String {
    shellexpand::tilde(s).into_owned()
}

fn expand_path(s: &str) -> PathBuf {
    PathBuf::from(expand(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_lives_in_data_dir() {
        let settings = Settings {
            data_dir: PathBuf::from("/tmp/sweep"),
            database: None,
        };
        assert_eq!(settings.database_url(), "/tmp/sweep/urlsweep.db");
    }

    #[test]
    fn target_db_file_selects_database() {
        let settings = load_settings(LoadOptions {
            config_path: None,
            target: Some(PathBuf::from("/data/crawl.db")),
        });
        assert_eq!(settings.database_url(), "/data/crawl.db");
        assert_eq!(settings.data_dir, PathBuf::from("/data"));
    }

    #[test]
    fn target_directory_resets_database() {
        let settings = load_settings(LoadOptions {
            config_path: None,
            target: Some(PathBuf::from("/data/crawls")),
        });
        assert_eq!(settings.data_dir, PathBuf::from("/data/crawls"));
        assert_eq!(settings.database_url(), "/data/crawls/urlsweep.db");
    }
}
