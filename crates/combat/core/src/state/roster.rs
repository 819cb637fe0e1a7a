//! Encounter-wide combatant roster and living queries.

use super::combatant::Combatant;
use super::common::{CombatantId, Side};

/// All combatants of one encounter, in scheduling priority order.
///
/// Dead combatants stay in the roster (the presentation layer still shows
/// them) but are filtered out of every `living_*` query. Queries read the
/// current state on each call; nothing is cached across a resolution.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    /// Wraps combatants whose ids already match their position.
    pub(crate) fn from_ordered(combatants: Vec<Combatant>) -> Self {
        debug_assert!(
            combatants
                .iter()
                .enumerate()
                .all(|(index, c)| c.id().index() == index)
        );
        Self { combatants }
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.index())
    }

    /// Looks up a combatant only if it is still alive.
    pub fn living(&self, id: CombatantId) -> Option<&Combatant> {
        self.get(id).filter(|c| c.is_alive())
    }

    pub(crate) fn living_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.get_mut(id).filter(|c| c.is_alive())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Living combatants on `side`, in priority order.
    pub fn living_on(&self, side: Side) -> Vec<CombatantId> {
        self.combatants
            .iter()
            .filter(|c| c.side() == side && c.is_alive())
            .map(Combatant::id)
            .collect()
    }

    /// Living members of the opposite side from `of`.
    ///
    /// Empty if `of` is unknown.
    pub fn living_enemies_of(&self, of: CombatantId) -> Vec<CombatantId> {
        self.get(of)
            .map(|c| self.living_on(c.side().opposite()))
            .unwrap_or_default()
    }

    /// Living members of the same side as `of`, including `of` itself if alive.
    pub fn living_allies_of(&self, of: CombatantId) -> Vec<CombatantId> {
        self.get(of)
            .map(|c| self.living_on(c.side()))
            .unwrap_or_default()
    }

    /// Returns true once every combatant on `side` is dead.
    pub fn is_defeated(&self, side: Side) -> bool {
        !self
            .combatants
            .iter()
            .any(|c| c.side() == side && c.is_alive())
    }
}
