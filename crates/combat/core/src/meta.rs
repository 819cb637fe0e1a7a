//! Persistent meta-stats consulted at encounter setup.

use std::collections::HashMap;

/// Source of per-class base stats that outlive a single encounter.
///
/// Read once, while the encounter is built.
pub trait MetaStats {
    /// Base action gauge rate for a combatant class, if known.
    fn base_action_rate(&self, class: &str) -> Option<f32>;
}

impl MetaStats for HashMap<String, f32> {
    fn base_action_rate(&self, class: &str) -> Option<f32> {
        self.get(class).copied()
    }
}

impl<T: MetaStats + ?Sized> MetaStats for &T {
    fn base_action_rate(&self, class: &str) -> Option<f32> {
        (**self).base_action_rate(class)
    }
}
