//! Meta-stats table loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::meta::MetaStatsTable;

/// Loader for per-class meta-stats from RON files.
pub struct MetaStatsLoader;

impl MetaStatsLoader {
    /// The table shipped with the crate (`data/meta_stats.ron`).
    pub fn builtin() -> LoadResult<MetaStatsTable> {
        Self::parse(include_str!("../../data/meta_stats.ron"))
    }

    pub fn load(path: &Path) -> LoadResult<MetaStatsTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MetaStatsTable> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse meta-stats RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use combat_core::MetaStats;

    use super::*;

    #[test]
    fn builtin_table_resolves_classes() {
        let table = MetaStatsLoader::builtin().unwrap();
        assert_eq!(table.base_action_rate("rogue"), Some(14.0));
        assert_eq!(table.base_action_rate("dragon"), None);
    }

    #[test]
    fn empty_table_parses() {
        let table = MetaStatsLoader::parse("()").unwrap();
        assert!(table.classes.is_empty());
    }
}
