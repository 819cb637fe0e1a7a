//! Per-class meta-stats table.

use std::collections::HashMap;

use combat_core::MetaStats;

/// Stats a character class carries between encounters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassStats {
    pub base_action_rate: f32,
}

/// Class key → stats. Backs [`MetaStats`] for encounter setup.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaStatsTable {
    #[cfg_attr(feature = "serde", serde(default))]
    pub classes: HashMap<String, ClassStats>,
}

impl MetaStatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<String>, stats: ClassStats) -> Self {
        self.classes.insert(class.into(), stats);
        self
    }

    pub fn get(&self, class: &str) -> Option<&ClassStats> {
        self.classes.get(class)
    }
}

impl MetaStats for MetaStatsTable {
    fn base_action_rate(&self, class: &str) -> Option<f32> {
        self.get(class).map(|stats| stats.base_action_rate)
    }
}
