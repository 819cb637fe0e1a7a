use crate::state::{Roster, Side};

/// How an encounter ended.
#[derive(Clone, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EncounterOutcome {
    /// Every enemy is dead.
    Victory,
    /// Every party member is dead.
    Defeat,
    /// Stopped from outside (e.g. the player fled or the scene unloaded).
    Aborted { reason: String },
}

impl EncounterOutcome {
    /// Evaluates the roster. A wiped party is a defeat even if the last enemy
    /// fell in the same resolution.
    pub(crate) fn evaluate(roster: &Roster) -> Option<Self> {
        if roster.is_defeated(Side::Ally) {
            Some(Self::Defeat)
        } else if roster.is_defeated(Side::Enemy) {
            Some(Self::Victory)
        } else {
            None
        }
    }
}
