//! Status effect engine.
//!
//! Maintains each combatant's active status set under the stacking and
//! cancellation rules, and is the only writer of derived multipliers.
//!
//! # Rules
//!
//! Per (combatant, type) the lifecycle is `absent → active(n) → absent`.
//!
//! 1. Applying a type whose opposite is active removes the opposite and does
//!    not apply the new type (the two annihilate).
//! 2. Re-applying an active type refreshes it to `max(existing, duration)`.
//! 3. Otherwise the type is inserted.
//!
//! Multipliers are recomputed after every change as a fold over the set, so
//! they can never drift from it.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::state::{Combatant, ModifiedStat, Multipliers, StatusSet, StatusType};

/// Result of [`StatusEngine::apply_status`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusOutcome {
    /// The status was absent and is now active.
    Applied { remaining_turns: u32 },
    /// The status was already active; duration is now the larger of the two.
    Refreshed { remaining_turns: u32 },
    /// The opposite status was active; both are now absent.
    Cancelled { removed: StatusType },
    /// Nothing changed (zero duration or dead target).
    Ignored,
}

/// Statuses removed by a single turn-end tick.
pub type ExpiredStatuses = ArrayVec<StatusType, { CombatConfig::MAX_STATUS_EFFECTS }>;

/// The per-encounter status service.
///
/// Holds no per-combatant state; statuses are stored on each [`Combatant`].
/// Constructed once per encounter and passed explicitly, never global.
#[derive(Clone, Debug, Default)]
pub struct StatusEngine;

impl StatusEngine {
    pub fn new() -> Self {
        Self
    }

    /// Applies `kind` for `duration` turns following the stacking rules.
    pub fn apply_status(
        &self,
        combatant: &mut Combatant,
        kind: StatusType,
        duration: u32,
    ) -> StatusOutcome {
        if duration == 0 || combatant.is_dead() {
            tracing::debug!(
                combatant = %combatant.id(),
                status = %kind,
                duration,
                "status application ignored"
            );
            return StatusOutcome::Ignored;
        }

        let opposite = kind.opposite();
        let outcome = if combatant.statuses_mut().remove(opposite) {
            StatusOutcome::Cancelled { removed: opposite }
        } else if let Some(existing) = combatant.statuses().remaining_turns(kind) {
            let remaining_turns = existing.max(duration);
            combatant.statuses_mut().set(kind, remaining_turns);
            StatusOutcome::Refreshed { remaining_turns }
        } else {
            combatant.statuses_mut().set(kind, duration);
            StatusOutcome::Applied {
                remaining_turns: duration,
            }
        };

        self.recompute(combatant);
        tracing::debug!(combatant = %combatant.id(), status = %kind, ?outcome, "status applied");
        outcome
    }

    /// Removes `kind` if present. Returns true if something was removed.
    pub fn remove_status(&self, combatant: &mut Combatant, kind: StatusType) -> bool {
        let removed = combatant.statuses_mut().remove(kind);
        if removed {
            self.recompute(combatant);
        }
        removed
    }

    pub fn has_status(&self, combatant: &Combatant, kind: StatusType) -> bool {
        combatant.statuses().has(kind)
    }

    /// Removes every status and resets multipliers to baseline.
    pub fn clear_all_statuses(&self, combatant: &mut Combatant) -> Vec<StatusType> {
        let removed: Vec<StatusType> = combatant.statuses().iter().map(|s| s.kind).collect();
        combatant.statuses_mut().clear();
        combatant.set_multipliers(Multipliers::BASELINE);
        removed
    }

    /// Removes every negative status (Weakness, Vulnerable, Slowed).
    pub fn clear_negative_statuses(&self, combatant: &mut Combatant) -> Vec<StatusType> {
        let removed: Vec<StatusType> = combatant
            .statuses()
            .iter()
            .map(|s| s.kind)
            .filter(|kind| kind.is_negative())
            .collect();
        for kind in &removed {
            combatant.statuses_mut().remove(*kind);
        }
        if !removed.is_empty() {
            self.recompute(combatant);
        }
        removed
    }

    /// Advances every status of `combatant` by one of its own turns.
    ///
    /// Call once per completed turn of the acting combatant only.
    pub fn tick_turn_end(&self, combatant: &mut Combatant) -> ExpiredStatuses {
        let expired = combatant.statuses_mut().tick();
        if !expired.is_empty() {
            self.recompute(combatant);
        }
        expired
    }

    /// Folds the active set into multipliers and stores them on the combatant.
    pub fn recompute(&self, combatant: &mut Combatant) {
        let multipliers = Self::fold(combatant.statuses());
        combatant.set_multipliers(multipliers);
    }

    /// Pure fold of a status set into derived multipliers.
    pub fn fold(statuses: &StatusSet) -> Multipliers {
        statuses
            .iter()
            .fold(Multipliers::BASELINE, |mut acc, status| {
                let (stat, factor) = status.kind.modifier();
                match stat {
                    ModifiedStat::Attack => acc.attack *= factor,
                    ModifiedStat::Defense => acc.defense *= factor,
                    ModifiedStat::ActionSpeed => acc.action_speed *= factor,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActionGauge, CombatantId, CombatantTemplate, Side};

    fn combatant() -> Combatant {
        Combatant::new(
            CombatantId(0),
            Side::Ally,
            &CombatantTemplate::new("Ada", 100.0, 50.0),
            ActionGauge::new(100.0, 10.0),
        )
    }

    #[test]
    fn baseline_without_statuses() {
        let c = combatant();
        assert_eq!(StatusEngine::fold(c.statuses()), Multipliers::BASELINE);
    }

    #[test]
    fn applies_and_recomputes_multipliers() {
        let engine = StatusEngine::new();
        let mut c = combatant();

        assert_eq!(
            engine.apply_status(&mut c, StatusType::Strength, 3),
            StatusOutcome::Applied { remaining_turns: 3 }
        );
        engine.apply_status(&mut c, StatusType::Vulnerable, 2);
        engine.apply_status(&mut c, StatusType::Agile, 2);

        assert_eq!(c.attack_multiplier(), 1.5);
        assert_eq!(c.defense_multiplier(), 2.0);
        assert_eq!(c.action_speed_multiplier(), 1.5);
    }

    #[test]
    fn opposed_pair_annihilates_in_either_order() {
        let engine = StatusEngine::new();
        let pairs = [
            (StatusType::Strength, StatusType::Weakness),
            (StatusType::Tough, StatusType::Vulnerable),
            (StatusType::Agile, StatusType::Slowed),
        ];

        for (a, b) in pairs {
            for (first, second) in [(a, b), (b, a)] {
                let mut c = combatant();
                engine.apply_status(&mut c, first, 3);
                let outcome = engine.apply_status(&mut c, second, 3);

                assert_eq!(outcome, StatusOutcome::Cancelled { removed: first });
                assert!(!engine.has_status(&c, first));
                assert!(!engine.has_status(&c, second));
                assert_eq!(c.multipliers(), Multipliers::BASELINE);
            }
        }
    }

    #[test]
    fn reapplying_keeps_the_longer_duration() {
        let engine = StatusEngine::new();

        let mut c = combatant();
        engine.apply_status(&mut c, StatusType::Tough, 2);
        let outcome = engine.apply_status(&mut c, StatusType::Tough, 5);
        assert_eq!(outcome, StatusOutcome::Refreshed { remaining_turns: 5 });
        assert_eq!(c.statuses().remaining_turns(StatusType::Tough), Some(5));

        let mut c = combatant();
        engine.apply_status(&mut c, StatusType::Tough, 5);
        engine.apply_status(&mut c, StatusType::Tough, 2);
        assert_eq!(c.statuses().remaining_turns(StatusType::Tough), Some(5));
        // Refreshing never stacks the multiplier.
        assert_eq!(c.defense_multiplier(), 0.5);
    }

    #[test]
    fn status_expires_after_its_turn_count() {
        let engine = StatusEngine::new();
        let mut c = combatant();
        engine.apply_status(&mut c, StatusType::Slowed, 3);

        assert!(engine.tick_turn_end(&mut c).is_empty());
        assert!(engine.tick_turn_end(&mut c).is_empty());
        assert!(c.has_status(StatusType::Slowed));
        assert_eq!(c.action_speed_multiplier(), 0.5);

        let expired = engine.tick_turn_end(&mut c);
        assert_eq!(expired.as_slice(), &[StatusType::Slowed]);
        assert!(!c.has_status(StatusType::Slowed));
        assert_eq!(c.action_speed_multiplier(), 1.0);
    }

    #[test]
    fn zero_duration_is_ignored() {
        let engine = StatusEngine::new();
        let mut c = combatant();
        engine.apply_status(&mut c, StatusType::Weakness, 2);

        assert_eq!(
            engine.apply_status(&mut c, StatusType::Strength, 0),
            StatusOutcome::Ignored
        );
        assert!(c.has_status(StatusType::Weakness));
    }

    #[test]
    fn remove_and_clear() {
        let engine = StatusEngine::new();
        let mut c = combatant();
        engine.apply_status(&mut c, StatusType::Strength, 2);
        engine.apply_status(&mut c, StatusType::Slowed, 2);

        assert!(engine.remove_status(&mut c, StatusType::Strength));
        assert!(!engine.remove_status(&mut c, StatusType::Strength));
        assert_eq!(c.attack_multiplier(), 1.0);

        let removed = engine.clear_all_statuses(&mut c);
        assert_eq!(removed, vec![StatusType::Slowed]);
        assert!(c.statuses().is_empty());
        assert_eq!(c.multipliers(), Multipliers::BASELINE);
    }

    #[test]
    fn clearing_negatives_keeps_buffs() {
        let engine = StatusEngine::new();
        let mut c = combatant();
        engine.apply_status(&mut c, StatusType::Strength, 2);
        engine.apply_status(&mut c, StatusType::Vulnerable, 2);
        engine.apply_status(&mut c, StatusType::Slowed, 2);

        let mut removed = engine.clear_negative_statuses(&mut c);
        removed.sort();
        assert_eq!(removed, vec![StatusType::Vulnerable, StatusType::Slowed]);
        assert!(c.has_status(StatusType::Strength));
        assert_eq!(c.defense_multiplier(), 1.0);
        assert_eq!(c.action_speed_multiplier(), 1.0);
    }
}
