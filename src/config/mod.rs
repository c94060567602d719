mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::db::get_database_path;
use crate::repositories::{validate_field_name, DEFAULT_COLLECTION};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// CLI arguments that take part in config resolution.
/// Unset flags fall through to the TOML file, then to defaults.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub database_path: Option<PathBuf>,
    pub collection: Option<String>,
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub collection: String,
    pub poll_interval: Duration,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// CLI values override TOML values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let database_path = match cli
            .database_path
            .clone()
            .or_else(|| file.database_path.map(PathBuf::from))
        {
            Some(path) => path,
            None => get_database_path()?,
        };
        if database_path.is_dir() {
            bail!("database_path points to a directory: {:?}", database_path);
        }

        let collection = cli
            .collection
            .clone()
            .or(file.collection)
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        if validate_field_name(&collection).is_err() {
            bail!(
                "Invalid collection name '{}': use letters, digits and underscores",
                collection
            );
        }

        let poll_interval_ms = cli
            .poll_interval_ms
            .or(file.poll_interval_ms)
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);
        if poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }

        Ok(Self {
            database_path,
            collection,
            poll_interval: Duration::from_millis(poll_interval_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_config() -> FileConfig {
        FileConfig {
            database_path: Some("/tmp/from-file.db".to_string()),
            collection: Some("from_file".to_string()),
            poll_interval_ms: Some(500),
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = AppConfig::resolve(&CliConfig::default(), None);

        // No data directory on some CI hosts
        let Ok(expected_path) = get_database_path() else {
            assert!(resolved.is_err());
            return;
        };

        let config = resolved.unwrap();
        assert_eq!(config.database_path, expected_path);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
        assert_eq!(config.poll_interval, Duration::from_millis(DEFAULT_POLL_INTERVAL_MS));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = AppConfig::resolve(&CliConfig::default(), Some(file_config())).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/from-file.db"));
        assert_eq!(config.collection, "from_file");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = CliConfig {
            database_path: Some(PathBuf::from("/tmp/from-cli.db")),
            collection: Some("from_cli".to_string()),
            poll_interval_ms: None,
        };

        let config = AppConfig::resolve(&cli, Some(file_config())).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/from-cli.db"));
        assert_eq!(config.collection, "from_cli");
        // Not given on the command line, so the file wins
        assert_eq!(config.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_directory_as_database_path() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            database_path: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };

        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_rejects_bad_collection_and_zero_interval() {
        let cli = CliConfig {
            database_path: Some(PathBuf::from("/tmp/x.db")),
            collection: Some("movies; drop".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());

        let cli = CliConfig {
            database_path: Some(PathBuf::from("/tmp/x.db")),
            poll_interval_ms: Some(0),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }
}
