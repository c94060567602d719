use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub database_path: Option<String>,
    pub collection: Option<String>,
    /// How often the watch command polls the database for outside writes
    pub poll_interval_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
database_path = "/tmp/movies.db"
collection = "classics"
poll_interval_ms = 250
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.database_path.as_deref(), Some("/tmp/movies.db"));
        assert_eq!(config.collection.as_deref(), Some("classics"));
        assert_eq!(config.poll_interval_ms, Some(250));
    }

    #[test]
    fn test_missing_keys_are_none() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"collection = "classics""#).unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.database_path.is_none());
        assert!(config.poll_interval_ms.is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_ms = \"soon\"").unwrap();

        let error = FileConfig::load(file.path()).unwrap_err();
        assert!(error.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let error = FileConfig::load(Path::new("/nonexistent/moviedeck.toml")).unwrap_err();
        assert!(error.to_string().contains("Failed to read config file"));
    }
}
