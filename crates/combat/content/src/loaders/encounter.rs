//! Encounter roster loader.

use std::path::Path;

use combat_core::{CombatantTemplate, EncounterBuilder};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Party and enemy templates for one encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub party: Vec<CombatantTemplate>,
    pub enemies: Vec<CombatantTemplate>,
}

impl EncounterSpec {
    /// Adds every template to `builder`, party first.
    pub fn into_builder<'a>(self, builder: EncounterBuilder<'a>) -> EncounterBuilder<'a> {
        builder.party_members(self.party).enemies(self.enemies)
    }
}

/// Loader for encounter rosters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// The sample encounter shipped with the crate.
    pub fn crypt() -> LoadResult<EncounterSpec> {
        Self::parse(include_str!("../../data/encounters/crypt.ron"))
    }

    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))
    }
}
