use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Title/description record shown on a panel's detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    pub title: String,
    pub description: String,
}

impl ContentEntry {
    fn fallback() -> Self {
        Self {
            title: "Untitled".to_string(),
            description: "No description available for this item yet.".to_string(),
        }
    }
}

/// Lookup table from panel id to display content. Unknown ids resolve to a
/// defined default record rather than an error.
pub struct ContentLibrary {
    entries: HashMap<String, ContentEntry>,
    default_entry: ContentEntry,
}

impl ContentLibrary {
    pub fn new() -> Self {
        Self { entries: HashMap::new(), default_entry: ContentEntry::fallback() }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read content file {}", path.display()))?;
        let entries: HashMap<String, ContentEntry> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse content file {}", path.display()))?;
        let mut library = Self::new();
        library.merge(entries);
        Ok(library)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(library) => library,
            Err(err) => {
                eprintln!("[content] Load error: {err:?}. Falling back to empty library.");
                Self::new()
            }
        }
    }

    pub fn merge(&mut self, entries: HashMap<String, ContentEntry>) {
        for (id, entry) in entries {
            // "default" overrides the fallback record instead of becoming a key.
            if id == "default" {
                self.default_entry = entry;
            } else {
                self.entries.insert(id, entry);
            }
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: ContentEntry) {
        self.entries.insert(id.into(), entry);
    }

    pub fn lookup(&self, id: &str) -> &ContentEntry {
        self.entries.get(id).unwrap_or(&self.default_entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ContentLibrary {
    fn default() -> Self {
        Self::new()
    }
}
