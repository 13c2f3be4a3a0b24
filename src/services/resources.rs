//! Drawable resource lookup for the notification icon.
//!
//! Sources name the icon (`"ic_notification"`); the SDK wants the integer
//! resource id. Following the platform convention, `0` means "no such
//! resource".

use anyhow::{Context, Result};
use camino::Utf8Path;
use indexmap::IndexMap;
use std::fs;

/// Resolves drawable resource names to integer identifiers.
pub trait ResourceResolver {
    /// Identifier for the named drawable, or `0` when it does not exist.
    fn drawable_identifier(&self, name: &str) -> i32;
}

/// In-memory drawable table, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawableTable {
    entries: IndexMap<String, i32>,
}

impl DrawableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a drawable.
    pub fn insert(&mut self, name: impl Into<String>, id: i32) {
        self.entries.insert(name.into(), id);
    }

    /// Load a table from a JSON object of `{ "name": id }` pairs.
    pub fn from_json_file<P: AsRef<Utf8Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read drawable table: {}", path))?;
        let entries: IndexMap<String, i32> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse drawable table: {}", path))?;

        tracing::info!("Loaded {} drawables from {}", entries.len(), path);
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for DrawableTable {
    fn from_iter<T: IntoIterator<Item = (S, i32)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl ResourceResolver for DrawableTable {
    fn drawable_identifier(&self, name: &str) -> i32 {
        self.entries.get(name).copied().unwrap_or(0)
    }
}
