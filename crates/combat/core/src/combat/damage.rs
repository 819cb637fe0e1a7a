//! Damage calculation and application.

use crate::state::{Combatant, CombatantId, Roster};

use super::guard::find_guardian;

/// Record of one resolved hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Combatant the hit was aimed at.
    pub target: CombatantId,
    /// Combatant that actually absorbed the hit (the guardian after redirection).
    pub receiver: CombatantId,
    /// Health actually removed, after the receiver's defense multiplier and clamping.
    pub applied: f32,
    /// Receiver health after the hit.
    pub remaining_health: f32,
    /// True if this hit brought the receiver to zero health.
    pub killed: bool,
}

impl DamageReport {
    pub fn was_redirected(&self) -> bool {
        self.target != self.receiver
    }
}

/// Scales a nominal amount by the source's attack multiplier.
///
/// Pure; no mutation.
pub fn calculate_damage(base_amount: f32, source: &Combatant) -> f32 {
    base_amount * source.attack_multiplier()
}

/// Applies `amount` of damage aimed at `target`.
///
/// # Resolution
///
/// ```text
/// receiver = guardian covering target, else target   (one level only)
/// applied  = amount × receiver.defense_multiplier     (clamped at 0 health)
/// ```
///
/// Returns `None` (and logs) if the target is unknown or already dead. Each
/// call re-evaluates guards and death, so multi-hit skills call this once
/// per hit.
pub fn take_damage(roster: &mut Roster, target: CombatantId, amount: f32) -> Option<DamageReport> {
    if roster.living(target).is_none() {
        tracing::warn!(%target, "damage dropped: target absent or dead");
        return None;
    }

    let receiver = find_guardian(roster, target).unwrap_or(target);
    let combatant = roster.living_mut(receiver)?;

    let scaled = amount.max(0.0) * combatant.defense_multiplier();
    let applied = combatant.health_mut().deplete(scaled);
    let remaining_health = combatant.health();
    let killed = applied > 0.0 && combatant.is_dead();

    if receiver != target {
        tracing::debug!(%target, guardian = %receiver, "damage redirected");
    }
    tracing::debug!(%receiver, applied, remaining_health, killed, "damage applied");

    Some(DamageReport {
        target,
        receiver,
        applied,
        remaining_health,
        killed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::Encounter;
    use crate::state::{CombatantTemplate, StatusType};
    use crate::status::StatusEngine;

    fn duel() -> Encounter {
        Encounter::builder()
            .party(CombatantTemplate::new("Knight", 120.0, 30.0))
            .enemy(CombatantTemplate::new("Ghoul", 100.0, 0.0))
            .build()
            .unwrap()
    }

    #[test]
    fn attack_multiplier_scales_base_damage() {
        let mut encounter = duel();
        let knight = CombatantId(0);
        let ghoul = CombatantId(1);

        let engine = StatusEngine::new();
        engine.apply_status(
            encounter.roster_mut().get_mut(knight).unwrap(),
            StatusType::Strength,
            2,
        );

        let amount = calculate_damage(60.0, encounter.combatant(knight).unwrap());
        assert_eq!(amount, 90.0);

        let report = take_damage(encounter.roster_mut(), ghoul, amount).unwrap();
        assert_eq!(report.applied, 90.0);
        assert_eq!(report.remaining_health, 10.0);
        assert!(!report.killed);
        assert!(!report.was_redirected());
    }

    #[test]
    fn defense_multiplier_scales_damage_taken() {
        let mut encounter = duel();
        let ghoul = CombatantId(1);
        let engine = StatusEngine::new();
        engine.apply_status(
            encounter.roster_mut().get_mut(ghoul).unwrap(),
            StatusType::Vulnerable,
            2,
        );

        let report = take_damage(encounter.roster_mut(), ghoul, 20.0).unwrap();
        assert_eq!(report.applied, 40.0);
    }

    #[test]
    fn overkill_clamps_at_zero_and_kills() {
        let mut encounter = duel();
        let ghoul = CombatantId(1);

        let report = take_damage(encounter.roster_mut(), ghoul, 500.0).unwrap();
        assert_eq!(report.applied, 100.0);
        assert_eq!(report.remaining_health, 0.0);
        assert!(report.killed);

        // Dead targets are a no-op, not an error.
        assert!(take_damage(encounter.roster_mut(), ghoul, 10.0).is_none());
        assert_eq!(encounter.combatant(ghoul).unwrap().health(), 0.0);
    }

    #[test]
    fn negative_damage_never_heals() {
        let mut encounter = duel();
        let ghoul = CombatantId(1);
        let report = take_damage(encounter.roster_mut(), ghoul, -30.0).unwrap();
        assert_eq!(report.applied, 0.0);
        assert_eq!(encounter.combatant(ghoul).unwrap().health(), 100.0);
    }

    #[test]
    fn unknown_target_is_a_no_op() {
        let mut encounter = duel();
        assert!(take_damage(encounter.roster_mut(), CombatantId(42), 10.0).is_none());
    }
}
