//! Action catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, CatalogEntry};
use crate::loaders::{LoadResult, read_file};

/// Catalog file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub actions: Vec<CatalogEntry>,
}

/// Loader for action catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// The catalog shipped with the crate (`data/catalog.ron`).
    pub fn builtin() -> LoadResult<Catalog> {
        Self::parse(include_str!("../../data/catalog.ron"))
    }

    /// Load a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Catalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load catalog {}: {}", path.display(), e))
    }

    /// Parse a catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Catalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;
        let catalog = Catalog::new(file.actions)?;
        tracing::debug!(actions = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}
