//! A simple rule-based policy for enemies and auto-battle.

use async_trait::async_trait;
use combat_content::{Catalog, CatalogEntry, EffectKind};
use combat_core::{ActionTags, Combatant, CombatantId, Encounter, TargetConstraint};

use super::{ActionChoice, ActionProvider};
use crate::error::{Result, RuntimeError};

/// Heals when hurt, otherwise hits the weakest enemy as hard as it can.
///
/// Only actions the actor can currently afford are considered.
#[derive(Debug, Clone, Copy)]
pub struct TacticalProvider {
    /// Health fraction at or below which healing takes priority.
    pub heal_threshold: f32,
}

impl Default for TacticalProvider {
    fn default() -> Self {
        Self {
            heal_threshold: 0.4,
        }
    }
}

impl TacticalProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_heal_threshold(mut self, heal_threshold: f32) -> Self {
        self.heal_threshold = heal_threshold;
        self
    }

    /// Picks an action for `actor` without touching the encounter.
    pub fn decide(
        &self,
        actor: &Combatant,
        encounter: &Encounter,
        catalog: &Catalog,
    ) -> Option<ActionChoice> {
        let id = actor.id();
        if actor.health() <= actor.max_health() * self.heal_threshold {
            let heal = catalog
                .tagged(ActionTags::HEAL)
                .find(|entry| affordable(actor, entry) && restores_health(entry));
            if let Some(heal) = heal {
                let target = match heal.profile.target {
                    TargetConstraint::Enemy => None,
                    _ => Some(id),
                };
                if target.is_some() || !heal.profile.requires_target {
                    return Some(ActionChoice::new(heal.profile.name.clone(), target));
                }
            }
        }

        let victim = weakest(encounter, &encounter.living_enemies_of(id))?;
        let attack = catalog
            .tagged(ActionTags::ATTACK)
            .filter(|entry| affordable(actor, entry))
            .filter(|entry| {
                !entry.profile.requires_target || entry.profile.target == TargetConstraint::Enemy
            })
            .fold(None::<&CatalogEntry>, |best, entry| match best {
                Some(best) if best.nominal_damage() >= entry.nominal_damage() => Some(best),
                _ => Some(entry),
            })?;

        let target = attack.profile.requires_target.then_some(victim);
        Some(ActionChoice::new(attack.profile.name.clone(), target))
    }
}

#[async_trait]
impl ActionProvider for TacticalProvider {
    async fn choose_action(
        &self,
        actor: CombatantId,
        encounter: &Encounter,
        catalog: &Catalog,
    ) -> Result<ActionChoice> {
        let combatant = encounter
            .combatant(actor)
            .ok_or(RuntimeError::NoUsableAction { actor })?;
        let choice = self
            .decide(combatant, encounter, catalog)
            .ok_or(RuntimeError::NoUsableAction { actor })?;
        tracing::debug!(%actor, action = %choice.action, target = ?choice.target, "tactical choice");
        Ok(choice)
    }
}

fn affordable(actor: &Combatant, entry: &CatalogEntry) -> bool {
    entry.profile.cost <= actor.sanity()
}

fn restores_health(entry: &CatalogEntry) -> bool {
    entry
        .effects
        .iter()
        .any(|effect| matches!(effect.kind, EffectKind::HealHealth { .. } | EffectKind::FullRestore))
}

/// Living combatant with the least health; the earliest in roster order wins ties.
fn weakest(encounter: &Encounter, candidates: &[CombatantId]) -> Option<CombatantId> {
    candidates
        .iter()
        .filter_map(|&id| encounter.combatant(id))
        .fold(None::<&Combatant>, |best, c| match best {
            Some(best) if best.health() <= c.health() => Some(best),
            _ => Some(c),
        })
        .map(Combatant::id)
}
