use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{collections::HashMap, fs, path::PathBuf};

/// Persistent string key-value service behind the preference layer.
///
/// Absence of a key is a normal, handled case, not an error.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: a flat TOML table under the platform data directory,
/// rewritten on every `set` (write-through, no batching).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at its default platform location.
    pub fn open() -> Result<Self> {
        Self::at(Self::store_file_path()?)
    }

    /// Open a store backed by an explicit file path.
    pub fn at(path: PathBuf) -> Result<Self> {
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preference file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse preference file: {}", path.display()))?
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries })
    }

    fn store_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherly", "weatherly")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("preferences.toml"))
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preference directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(&self.entries)
            .context("Failed to serialize preferences to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preference file: {}", self.path.display()))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("unit", "celsius").unwrap();
        assert_eq!(store.get("unit").as_deref(), Some("celsius"));
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!(
            "weatherly-store-test-{}.toml",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        {
            let mut store = FileStore::at(path.clone()).unwrap();
            store.set("theme", "dark").unwrap();
        }

        let reopened = FileStore::at(path.clone()).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let path = std::env::temp_dir().join(format!(
            "weatherly-store-absent-{}.toml",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let store = FileStore::at(path).unwrap();
        assert_eq!(store.get("anything"), None);
    }
}
