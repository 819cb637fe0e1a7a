//! Guard relations: one combatant absorbing hits aimed at another.

use crate::action::{ActionError, InvalidTargetReason};
use crate::state::{CombatantId, Guard, Roster};

/// Finds the living guardian that should absorb a hit aimed at `target`.
///
/// A dedicated [`Guard::Ally`] wins over a [`Guard::Side`]; remaining ties go
/// to roster order. Guardians must share the target's side.
pub fn find_guardian(roster: &Roster, target: CombatantId) -> Option<CombatantId> {
    let side = roster.get(target)?.side();
    let mut side_guard = None;

    for guardian in roster.iter().filter(|c| c.is_alive() && c.side() == side) {
        match guardian.guard() {
            Some(guard @ Guard::Ally(_)) if guard.covers(guardian.id(), target) => {
                return Some(guardian.id());
            }
            Some(guard @ Guard::Side) if guard.covers(guardian.id(), target) => {
                side_guard.get_or_insert(guardian.id());
            }
            _ => {}
        }
    }

    side_guard
}

/// Puts `guardian` in a stance covering every other living ally.
///
/// Replaces any previous guard held by `guardian`.
pub fn activate_guard(roster: &mut Roster, guardian: CombatantId) -> Result<Guard, ActionError> {
    let combatant = roster
        .living_mut(guardian)
        .ok_or(ActionError::UserDead { user: guardian })?;
    combatant.set_guard(Some(Guard::Side));
    Ok(Guard::Side)
}

/// Makes `guardian` absorb hits aimed at `ally` until its next turn.
///
/// `ally` must be a different, living member of the guardian's side.
pub fn guard_ally(
    roster: &mut Roster,
    guardian: CombatantId,
    ally: CombatantId,
) -> Result<Guard, ActionError> {
    let guardian_side = roster
        .living(guardian)
        .ok_or(ActionError::UserDead { user: guardian })?
        .side();

    let invalid = |reason| ActionError::InvalidTarget {
        user: guardian,
        target: Some(ally),
        reason,
    };
    if ally == guardian {
        return Err(invalid(InvalidTargetReason::SelfNotAllowed));
    }
    let ally_state = roster
        .get(ally)
        .ok_or_else(|| invalid(InvalidTargetReason::Unknown))?;
    if ally_state.is_dead() {
        return Err(invalid(InvalidTargetReason::Dead));
    }
    if ally_state.side() != guardian_side {
        return Err(invalid(InvalidTargetReason::WrongSide));
    }

    let guard = Guard::Ally(ally);
    if let Some(combatant) = roster.get_mut(guardian) {
        combatant.set_guard(Some(guard));
    }
    Ok(guard)
}

/// Drops the guard held by `guardian`, returning it if there was one.
pub fn clear_guard(roster: &mut Roster, guardian: CombatantId) -> Option<Guard> {
    let combatant = roster.get_mut(guardian)?;
    let previous = combatant.guard();
    combatant.set_guard(None);
    previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::take_damage;
    use crate::encounter::Encounter;
    use crate::state::{CombatantTemplate, StatusType};
    use crate::status::StatusEngine;

    const TANK: CombatantId = CombatantId(0);
    const MAGE: CombatantId = CombatantId(1);
    const ARCHER: CombatantId = CombatantId(2);
    const ORC: CombatantId = CombatantId(3);

    fn party() -> Encounter {
        Encounter::builder()
            .party(CombatantTemplate::new("Tank", 200.0, 10.0))
            .party(CombatantTemplate::new("Mage", 60.0, 80.0))
            .party(CombatantTemplate::new("Archer", 70.0, 20.0))
            .enemy(CombatantTemplate::new("Orc", 150.0, 0.0))
            .build()
            .unwrap()
    }

    #[test]
    fn redirected_damage_uses_guardian_defense() {
        let mut encounter = party();
        StatusEngine::new().apply_status(
            encounter.roster_mut().get_mut(TANK).unwrap(),
            StatusType::Tough,
            3,
        );
        guard_ally(encounter.roster_mut(), TANK, MAGE).unwrap();

        let report = take_damage(encounter.roster_mut(), MAGE, 40.0).unwrap();
        assert_eq!(report.receiver, TANK);
        assert!(report.was_redirected());
        assert_eq!(encounter.combatant(TANK).unwrap().health(), 180.0);
        assert_eq!(encounter.combatant(MAGE).unwrap().health(), 60.0);
    }

    #[test]
    fn side_guard_covers_everyone_but_the_guardian() {
        let mut encounter = party();
        activate_guard(encounter.roster_mut(), TANK).unwrap();

        assert_eq!(find_guardian(encounter.roster(), MAGE), Some(TANK));
        assert_eq!(find_guardian(encounter.roster(), ARCHER), Some(TANK));
        assert_eq!(find_guardian(encounter.roster(), TANK), None);
        assert_eq!(find_guardian(encounter.roster(), ORC), None);
    }

    #[test]
    fn dedicated_guard_beats_side_guard() {
        let mut encounter = party();
        activate_guard(encounter.roster_mut(), TANK).unwrap();
        guard_ally(encounter.roster_mut(), ARCHER, MAGE).unwrap();

        assert_eq!(find_guardian(encounter.roster(), MAGE), Some(ARCHER));
    }

    #[test]
    fn redirection_is_one_level_deep() {
        let mut encounter = party();
        guard_ally(encounter.roster_mut(), MAGE, ARCHER).unwrap();
        guard_ally(encounter.roster_mut(), TANK, MAGE).unwrap();

        // Archer's hit goes to Mage and stops there.
        let report = take_damage(encounter.roster_mut(), ARCHER, 10.0).unwrap();
        assert_eq!(report.receiver, MAGE);
        assert_eq!(encounter.combatant(TANK).unwrap().health(), 200.0);
    }

    #[test]
    fn dead_guardian_no_longer_redirects() {
        let mut encounter = party();
        guard_ally(encounter.roster_mut(), ARCHER, MAGE).unwrap();
        take_damage(encounter.roster_mut(), ARCHER, 500.0);

        let report = take_damage(encounter.roster_mut(), MAGE, 10.0).unwrap();
        assert_eq!(report.receiver, MAGE);
    }

    #[test]
    fn guard_targets_are_validated() {
        let mut encounter = party();
        let roster = encounter.roster_mut();

        assert!(matches!(
            guard_ally(roster, TANK, TANK),
            Err(ActionError::InvalidTarget {
                reason: InvalidTargetReason::SelfNotAllowed,
                ..
            })
        ));
        assert!(matches!(
            guard_ally(roster, TANK, ORC),
            Err(ActionError::InvalidTarget {
                reason: InvalidTargetReason::WrongSide,
                ..
            })
        ));
        assert_eq!(roster.get(TANK).unwrap().guard(), None);
    }

    #[test]
    fn new_guard_replaces_old_one() {
        let mut encounter = party();
        guard_ally(encounter.roster_mut(), TANK, MAGE).unwrap();
        guard_ally(encounter.roster_mut(), TANK, ARCHER).unwrap();

        assert_eq!(find_guardian(encounter.roster(), MAGE), None);
        assert_eq!(find_guardian(encounter.roster(), ARCHER), Some(TANK));
        assert_eq!(
            clear_guard(encounter.roster_mut(), TANK),
            Some(Guard::Ally(ARCHER))
        );
        assert_eq!(find_guardian(encounter.roster(), ARCHER), None);
    }
}
