//! Healing and resource spending.
//!
//! Heals are additive and clamp at the maximum. They ignore attack and
//! defense multipliers.

use crate::action::ActionError;
use crate::state::{CombatantId, Roster};

/// Resource pools an action can restore or spend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Health,
    Sanity,
}

/// Record of one restore.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealReport {
    pub target: CombatantId,
    pub resource: ResourceKind,
    /// Amount actually gained after clamping.
    pub applied: f32,
    pub current: f32,
}

/// Restores health. Dead or unknown targets are a logged no-op.
pub fn heal_health(roster: &mut Roster, target: CombatantId, amount: f32) -> Option<HealReport> {
    restore(roster, target, ResourceKind::Health, amount)
}

/// Restores sanity. Dead or unknown targets are a logged no-op.
pub fn heal_sanity(roster: &mut Roster, target: CombatantId, amount: f32) -> Option<HealReport> {
    restore(roster, target, ResourceKind::Sanity, amount)
}

fn restore(
    roster: &mut Roster,
    target: CombatantId,
    resource: ResourceKind,
    amount: f32,
) -> Option<HealReport> {
    let Some(combatant) = roster.living_mut(target) else {
        tracing::warn!(%target, %resource, "heal dropped: target absent or dead");
        return None;
    };

    let meter = match resource {
        ResourceKind::Health => combatant.health_mut(),
        ResourceKind::Sanity => combatant.sanity_mut(),
    };
    let applied = meter.restore(amount);
    let current = meter.current();

    Some(HealReport {
        target,
        resource,
        applied,
        current,
    })
}

/// Deducts an action's sanity cost.
///
/// Fails without mutating anything when the pool is smaller than `cost`.
pub fn spend_sanity(roster: &mut Roster, user: CombatantId, cost: f32) -> Result<f32, ActionError> {
    let combatant = roster
        .get_mut(user)
        .ok_or(ActionError::UnknownCombatant { id: user })?;

    if combatant.sanity() < cost {
        return Err(ActionError::InsufficientResource {
            user,
            resource: ResourceKind::Sanity,
            required: cost,
            available: combatant.sanity(),
        });
    }

    Ok(combatant.sanity_mut().deplete(cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::take_damage;
    use crate::encounter::Encounter;
    use crate::state::CombatantTemplate;

    fn setup() -> Encounter {
        Encounter::builder()
            .party(CombatantTemplate::new("Cleric", 80.0, 40.0))
            .enemy(CombatantTemplate::new("Imp", 30.0, 0.0))
            .build()
            .unwrap()
    }

    #[test]
    fn heal_clamps_at_maximum() {
        let mut encounter = setup();
        let cleric = CombatantId(0);
        take_damage(encounter.roster_mut(), cleric, 30.0);

        let report = heal_health(encounter.roster_mut(), cleric, 100.0).unwrap();
        assert_eq!(report.applied, 30.0);
        assert_eq!(report.current, 80.0);
    }

    #[test]
    fn dead_cannot_be_healed() {
        let mut encounter = setup();
        let imp = CombatantId(1);
        take_damage(encounter.roster_mut(), imp, 30.0);

        assert!(heal_health(encounter.roster_mut(), imp, 10.0).is_none());
        assert!(encounter.combatant(imp).unwrap().is_dead());
    }

    #[test]
    fn spending_more_than_available_is_refused() {
        let mut encounter = setup();
        let cleric = CombatantId(0);

        assert_eq!(spend_sanity(encounter.roster_mut(), cleric, 25.0), Ok(25.0));
        let err = spend_sanity(encounter.roster_mut(), cleric, 25.0).unwrap_err();
        assert!(matches!(err, ActionError::InsufficientResource { .. }));
        assert_eq!(encounter.combatant(cleric).unwrap().sanity(), 15.0);

        let report = heal_sanity(encounter.roster_mut(), cleric, 5.0).unwrap();
        assert_eq!(report.current, 20.0);
    }
}
