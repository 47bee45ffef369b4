//! Catalog loading
//!
//! A catalog is a JSON array of searchable records exported by the app,
//! already flattened to the shape the search engine scores.

use crate::error::{Error, Result, ResultExt};
use keepsake_search::{items_from_json, ContentType, SearchableItem};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Records loaded from one catalog file
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Where the records came from, if a file
    pub path: Option<PathBuf>,
    items: Vec<SearchableItem>,
}

impl Catalog {
    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path).with_context("While loading catalog"));
        }

        let content = std::fs::read_to_string(path)?;
        let mut catalog = Self::from_json(&content)
            .context(format!("While parsing catalog {}", path.display()))?;
        catalog.path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            records = catalog.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Parse catalog records from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_items(items_from_json(json)?))
    }

    /// Wrap records that are already in memory
    pub fn from_items(items: Vec<SearchableItem>) -> Self {
        Self { path: None, items }
    }

    /// All records, in file order
    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the catalog has no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record counts per content type, omitting types with none
    pub fn counts_by_type(&self) -> BTreeMap<ContentType, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.content_type).or_insert(0) += 1;
        }
        counts
    }
}
