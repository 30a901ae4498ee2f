//! Configuration management

use crate::error::{JournalError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "journal-store.toml";

/// Store-facing settings: which top-level collection holds user documents and
/// which sub-collection under each user holds the journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub collection: String,
    pub entries_subcollection: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            collection: "users".to_string(),
            entries_subcollection: "journalEntries".to_string(),
        }
    }
}

impl Config {
    /// Load config from `journal-store.toml` in the given directory.
    ///
    /// A missing file yields the defaults; a present but unparseable file is
    /// an error.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(JournalError::Io(e)),
        };

        toml::from_str(&contents).map_err(|e| {
            JournalError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e))
        })
    }

    /// Save config to `journal-store.toml` in the given directory.
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.join(CONFIG_FILE), contents)?;
        Ok(())
    }

    /// The top-level collection name, with the `JOURNAL_COLLECTION`
    /// environment variable taking precedence over the file value.
    pub fn collection(&self) -> String {
        std::env::var("JOURNAL_COLLECTION").unwrap_or_else(|_| self.collection.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.collection, "users");
        assert_eq!(config.entries_subcollection, "journalEntries");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            collection: "accounts".to_string(),
            entries_subcollection: "posts".to_string(),
        };

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join("journal-store.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_malformed_config_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("journal-store.toml"), "collection = [").unwrap();

        let result = Config::load_from_dir(temp.path());
        match result {
            Err(JournalError::Config(msg)) => assert!(msg.contains("journal-store.toml")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
