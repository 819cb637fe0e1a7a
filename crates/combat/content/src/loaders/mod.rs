//! Content loaders for reading combat data from files.
//!
//! Catalogs, meta-stats and encounter rosters are RON; combat tuning is TOML.

pub mod catalog;
pub mod config;
pub mod encounter;
pub mod meta;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use encounter::{EncounterLoader, EncounterSpec};
pub use meta::MetaStatsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
