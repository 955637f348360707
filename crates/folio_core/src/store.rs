//! Client-side preference store
//!
//! A small string key-value store standing in for the browser's
//! `localStorage`. Values live in memory; when the store is opened with a
//! path, the whole map is written back to that file (JSON) on every mutation
//! and loaded from it at open time.
//!
//! # Example
//!
//! ```rust
//! use folio_core::store::PreferenceStore;
//!
//! let mut prefs = PreferenceStore::in_memory();
//! prefs.set("theme", "dark").unwrap();
//! assert_eq!(prefs.get("theme"), Some("dark"));
//! ```

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key-value store with optional file persistence
#[derive(Debug, Default)]
pub struct PreferenceStore {
    values: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(
            "PreferenceStore: opened {} ({} entries)",
            path.display(),
            values.len()
        );
        Ok(Self {
            values,
            path: Some(path),
        })
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.to_string(), value.into());
        self.persist()
    }

    pub fn delete(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.values.clear();
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a crash never leaves a truncated file
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&self.values)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
