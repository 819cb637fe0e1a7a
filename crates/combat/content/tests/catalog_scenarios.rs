//! Built-in catalog actions resolved against real encounters.

use combat_content::{Catalog, CatalogLoader};
use combat_core::{
    ActionError, ActionReport, CombatEvent, CombatantId, CombatantTemplate, Encounter,
    InvalidTargetReason, StatusType,
};

const HERO: CombatantId = CombatantId(0);
const CLERIC: CombatantId = CombatantId(1);
const WITCH: CombatantId = CombatantId(2);
const IMP: CombatantId = CombatantId(3);

fn catalog() -> Catalog {
    CatalogLoader::builtin().expect("builtin catalog should load")
}

fn encounter() -> Encounter {
    Encounter::builder()
        .party(CombatantTemplate::new("Hero", 150.0, 30.0))
        .party(CombatantTemplate::new("Cleric", 90.0, 60.0))
        .enemy(CombatantTemplate::new("Witch", 100.0, 40.0))
        .enemy(CombatantTemplate::new("Imp", 20.0, 0.0))
        .build()
        .unwrap()
}

/// Gives `user` a turn and uses `action` on `target`.
fn act(
    encounter: &mut Encounter,
    catalog: &Catalog,
    user: CombatantId,
    action: &str,
    target: Option<CombatantId>,
) -> Result<ActionReport, ActionError> {
    let entry = catalog.get(action).expect("action in catalog");
    encounter.simulate_trigger(user);
    encounter.begin_turn(user)?;
    let result = encounter.perform(entry, user, target);
    encounter.end_turn();
    result
}

fn damage_events(encounter: &mut Encounter) -> Vec<f32> {
    encounter
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::DamageApplied { amount, .. } => Some(amount),
            _ => None,
        })
        .collect()
}

#[test]
fn panacea_clears_ailments_and_keeps_blessings() {
    let catalog = catalog();
    let mut encounter = encounter();

    act(&mut encounter, &catalog, CLERIC, "Haste", Some(HERO)).unwrap();
    act(&mut encounter, &catalog, WITCH, "Hex", Some(HERO)).unwrap();
    act(&mut encounter, &catalog, WITCH, "Expose", Some(HERO)).unwrap();

    let hero = encounter.combatant(HERO).unwrap();
    assert_eq!(hero.attack_multiplier(), 0.5);
    assert_eq!(hero.defense_multiplier(), 2.0);
    assert_eq!(hero.action_speed_multiplier(), 1.5);

    act(&mut encounter, &catalog, CLERIC, "Panacea", Some(HERO)).unwrap();

    let hero = encounter.combatant(HERO).unwrap();
    assert!(hero.has_status(StatusType::Agile));
    assert!(!hero.has_status(StatusType::Weakness));
    assert!(!hero.has_status(StatusType::Vulnerable));
    assert_eq!(hero.attack_multiplier(), 1.0);
    assert_eq!(hero.defense_multiplier(), 1.0);
    assert_eq!(hero.action_speed_multiplier(), 1.5);
}

#[test]
fn panacea_cures_every_ailment_and_restores_to_max() {
    let catalog = catalog();
    let mut encounter = encounter();

    act(&mut encounter, &catalog, HERO, "Flurry", Some(WITCH)).unwrap();
    act(&mut encounter, &catalog, WITCH, "Attack", Some(HERO)).unwrap();
    for ailment in ["Hex", "Expose", "Hinder"] {
        act(&mut encounter, &catalog, WITCH, ailment, Some(HERO)).unwrap();
    }

    let hero = encounter.combatant(HERO).unwrap();
    assert!(hero.has_status(StatusType::Weakness));
    assert!(hero.has_status(StatusType::Vulnerable));
    assert!(hero.has_status(StatusType::Slowed));
    assert!(hero.health() < hero.max_health());
    assert!(hero.sanity() < hero.max_sanity());

    act(&mut encounter, &catalog, CLERIC, "Panacea", Some(HERO)).unwrap();

    let hero = encounter.combatant(HERO).unwrap();
    assert!(!hero.has_status(StatusType::Weakness));
    assert!(!hero.has_status(StatusType::Vulnerable));
    assert!(!hero.has_status(StatusType::Slowed));
    assert_eq!(hero.health(), hero.max_health());
    assert_eq!(hero.sanity(), hero.max_sanity());
    assert_eq!(encounter.combatant(CLERIC).unwrap().sanity(), 60.0);
}

#[test]
fn empower_then_hex_cancel_out() {
    let catalog = catalog();
    let mut encounter = encounter();

    act(&mut encounter, &catalog, CLERIC, "Empower", Some(HERO)).unwrap();
    act(&mut encounter, &catalog, WITCH, "Hex", Some(HERO)).unwrap();

    let hero = encounter.combatant(HERO).unwrap();
    assert!(hero.statuses().is_empty());
    assert_eq!(hero.attack_multiplier(), 1.0);
    assert!(encounter.events().contains(&CombatEvent::StatusCancelled {
        target: HERO,
        attempted: StatusType::Weakness,
        removed: StatusType::Strength,
    }));
}

#[test]
fn flurry_lands_each_hit_separately() {
    let catalog = catalog();
    let mut encounter = encounter();
    act(&mut encounter, &catalog, CLERIC, "Empower", Some(HERO)).unwrap();
    encounter.drain_events();

    act(&mut encounter, &catalog, HERO, "Flurry", Some(WITCH)).unwrap();

    assert_eq!(damage_events(&mut encounter), vec![12.0, 12.0, 12.0]);
    assert_eq!(encounter.combatant(WITCH).unwrap().health(), 64.0);
    assert_eq!(encounter.combatant(HERO).unwrap().sanity(), 25.0);
}

#[test]
fn hits_after_a_kill_are_dropped() {
    let catalog = catalog();
    let mut encounter = Encounter::builder()
        .party(CombatantTemplate::new("Hero", 150.0, 30.0))
        .enemy(CombatantTemplate::new("Rat", 5.0, 0.0))
        .enemy(CombatantTemplate::new("Rat", 5.0, 0.0))
        .build()
        .unwrap();
    let rat = CombatantId(1);

    act(&mut encounter, &catalog, HERO, "Flurry", Some(rat)).unwrap();

    assert_eq!(damage_events(&mut encounter), vec![5.0]);
    assert!(encounter.combatant(rat).unwrap().is_dead());
}

#[test]
fn sweep_hits_every_living_enemy() {
    let catalog = catalog();
    let mut encounter = encounter();
    act(&mut encounter, &catalog, HERO, "Attack", Some(IMP)).unwrap();
    assert!(encounter.combatant(IMP).unwrap().is_dead());
    encounter.drain_events();

    let report = act(&mut encounter, &catalog, HERO, "Sweep", None).unwrap();

    assert_eq!(report.target, None);
    assert_eq!(damage_events(&mut encounter), vec![12.0]);
    assert_eq!(encounter.combatant(WITCH).unwrap().health(), 88.0);
}

#[test]
fn guard_redirects_to_the_guardian_until_its_next_turn() {
    let catalog = catalog();
    let mut encounter = encounter();

    act(&mut encounter, &catalog, HERO, "Guard", None).unwrap();
    act(&mut encounter, &catalog, WITCH, "Attack", Some(CLERIC)).unwrap();
    assert_eq!(encounter.combatant(CLERIC).unwrap().health(), 90.0);
    assert_eq!(encounter.combatant(HERO).unwrap().health(), 130.0);

    act(&mut encounter, &catalog, HERO, "Attack", Some(WITCH)).unwrap();
    act(&mut encounter, &catalog, WITCH, "Attack", Some(CLERIC)).unwrap();
    assert_eq!(encounter.combatant(CLERIC).unwrap().health(), 70.0);
}

#[test]
fn cover_cannot_target_the_user() {
    let catalog = catalog();
    let mut encounter = encounter();

    let error = act(&mut encounter, &catalog, HERO, "Cover", Some(HERO)).unwrap_err();
    assert!(matches!(
        error,
        ActionError::InvalidTarget {
            reason: InvalidTargetReason::SelfNotAllowed,
            ..
        }
    ));
    assert_eq!(encounter.combatant(HERO).unwrap().guard(), None);
}

#[test]
fn stagger_empties_the_target_gauge() {
    let catalog = catalog();
    let mut encounter = encounter();
    encounter.advance(5.0);
    assert_eq!(encounter.combatant(WITCH).unwrap().current_action(), 50.0);

    act(&mut encounter, &catalog, HERO, "Stagger", Some(WITCH)).unwrap();

    let witch = encounter.combatant(WITCH).unwrap();
    assert_eq!(witch.current_action(), 0.0);
    assert_eq!(witch.health(), 90.0);
}

#[test]
fn items_restore_and_clamp() {
    let catalog = catalog();
    let mut encounter = encounter();
    act(&mut encounter, &catalog, WITCH, "Attack", Some(CLERIC)).unwrap();
    act(&mut encounter, &catalog, CLERIC, "Flurry", Some(WITCH)).unwrap();

    act(&mut encounter, &catalog, HERO, "Potion", Some(CLERIC)).unwrap();
    assert_eq!(encounter.combatant(CLERIC).unwrap().health(), 90.0);

    act(&mut encounter, &catalog, HERO, "Ether", Some(CLERIC)).unwrap();
    let cleric = encounter.combatant(CLERIC).unwrap();
    assert_eq!(cleric.sanity(), cleric.max_sanity());
}

#[test]
fn costly_action_fails_when_sanity_runs_out() {
    let catalog = catalog();
    let mut encounter = Encounter::builder()
        .party(CombatantTemplate::new("Squire", 80.0, 12.0))
        .enemy(CombatantTemplate::new("Imp", 20.0, 0.0))
        .build()
        .unwrap();
    let squire = CombatantId(0);

    act(&mut encounter, &catalog, squire, "Rally", Some(squire)).unwrap();
    let error = act(&mut encounter, &catalog, squire, "Hex", Some(CombatantId(1))).unwrap_err();

    assert!(matches!(error, ActionError::InsufficientResource { .. }));
    assert!(!encounter.combatant(CombatantId(1)).unwrap().has_status(StatusType::Weakness));
}
