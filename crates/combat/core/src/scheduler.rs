//! Action-gauge turn scheduler.
//!
//! Every living combatant's gauge fills at `base_rate × action_speed_multiplier`
//! per unit of time. A combatant whose gauge is full is ready to act; when
//! several are ready the lowest [`CombatantId`] (party first, then enemies, in
//! setup order) goes first.
//!
//! Speed changes only affect future [`TurnScheduler::advance`] calls; gauge
//! already accumulated is never rescaled.

use crate::state::{Combatant, CombatantId, Roster};

/// Decides who acts next and advances simulated time otherwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnScheduler {
    clock: f32,
    stopped: bool,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total simulated time advanced so far.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Permanently halts the scheduler (encounter finished or aborted).
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Fills every living combatant's gauge by `rate × elapsed`.
    ///
    /// Dead combatants are frozen. Non-positive or non-finite `elapsed` is
    /// ignored.
    pub fn advance(&mut self, roster: &mut Roster, elapsed: f32) {
        if self.stopped {
            return;
        }
        if !elapsed.is_finite() || elapsed <= 0.0 {
            tracing::warn!(elapsed, "scheduler advance ignored: invalid elapsed time");
            return;
        }

        for combatant in roster.iter_mut().filter(|c| c.is_alive()) {
            let rate = fill_rate(combatant);
            combatant.gauge_mut().fill_by(rate * elapsed);
        }
        self.clock += elapsed;
    }

    /// The living combatant with a full gauge and the highest priority.
    pub fn next_actor(&self, roster: &Roster) -> Option<CombatantId> {
        if self.stopped {
            return None;
        }
        roster
            .iter()
            .find(|c| c.is_alive() && c.gauge().is_full())
            .map(Combatant::id)
    }

    /// All ready combatants in priority order.
    pub fn ready_actors(&self, roster: &Roster) -> Vec<CombatantId> {
        if self.stopped {
            return Vec::new();
        }
        roster
            .iter()
            .filter(|c| c.is_alive() && c.gauge().is_full())
            .map(Combatant::id)
            .collect()
    }

    /// Empties the gauge of `id`. No-op (returns false) for dead or unknown ids.
    pub fn reset_action(&self, roster: &mut Roster, id: CombatantId) -> bool {
        match roster.living_mut(id) {
            Some(combatant) => {
                combatant.gauge_mut().reset();
                true
            }
            None => false,
        }
    }

    /// Fills the gauge of `id` so it is ready immediately. No-op for dead ids.
    pub fn fill_action(&self, roster: &mut Roster, id: CombatantId) -> bool {
        match roster.living_mut(id) {
            Some(combatant) => {
                combatant.gauge_mut().fill();
                true
            }
            None => false,
        }
    }

    /// Time until `combatant` is ready at its current rate.
    ///
    /// `Some(0.0)` if already ready; `None` if dead or not filling.
    pub fn time_until_ready(&self, combatant: &Combatant) -> Option<f32> {
        if combatant.is_dead() {
            return None;
        }
        let gauge = combatant.gauge();
        if gauge.is_full() {
            return Some(0.0);
        }
        let rate = fill_rate(combatant);
        (rate > 0.0).then(|| (gauge.maximum() - gauge.current()) / rate)
    }

    /// Smallest [`time_until_ready`](Self::time_until_ready) across the roster.
    pub fn time_until_next_ready(&self, roster: &Roster) -> Option<f32> {
        roster
            .iter()
            .filter_map(|c| self.time_until_ready(c))
            .min_by(f32::total_cmp)
    }

    /// Test seam: forces `id` ready and reports it as the triggered actor.
    ///
    /// Returns `None` for dead or unknown combatants.
    pub fn simulate_trigger(&self, roster: &mut Roster, id: CombatantId) -> Option<CombatantId> {
        self.fill_action(roster, id).then_some(id)
    }
}

fn fill_rate(combatant: &Combatant) -> f32 {
    combatant.gauge().base_rate() * combatant.action_speed_multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::take_damage;
    use crate::encounter::Encounter;
    use crate::state::{CombatantTemplate, StatusType};
    use crate::status::StatusEngine;

    fn ticks_until_ready(
        scheduler: &mut TurnScheduler,
        roster: &mut Roster,
        id: CombatantId,
    ) -> u32 {
        let mut ticks = 0;
        while roster.get(id).is_some_and(|c| !c.gauge().is_full()) {
            scheduler.advance(roster, 1.0);
            ticks += 1;
            assert!(ticks < 1_000, "gauge never filled");
        }
        ticks
    }

    fn pair(rate: f32) -> Encounter {
        Encounter::builder()
            .party(
                CombatantTemplate::new("Scout", 50.0, 10.0)
                    .with_base_rate(rate)
                    .with_max_action(150.0),
            )
            .enemy(
                CombatantTemplate::new("Slime", 50.0, 0.0)
                    .with_base_rate(rate)
                    .with_max_action(150.0),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn agile_reaches_full_gauge_in_two_thirds_of_the_ticks() {
        let mut encounter = pair(10.0);
        StatusEngine::new().apply_status(
            encounter.roster_mut().get_mut(CombatantId(0)).unwrap(),
            StatusType::Agile,
            5,
        );
        let mut scheduler = TurnScheduler::new();

        let agile = ticks_until_ready(&mut scheduler, encounter.roster_mut(), CombatantId(0));
        let rest = ticks_until_ready(&mut scheduler, encounter.roster_mut(), CombatantId(1));
        // Baseline needs 15 ticks in total; Agile needs two thirds of that.
        assert_eq!(agile, 10);
        assert_eq!(agile + rest, 15);
    }

    #[test]
    fn speed_change_is_not_retroactive() {
        let mut encounter = pair(10.0);
        let mut scheduler = TurnScheduler::new();
        scheduler.advance(encounter.roster_mut(), 5.0);
        let scout = |e: &Encounter| e.combatant(CombatantId(0)).unwrap().current_action();
        assert_eq!(scout(&encounter), 50.0);

        StatusEngine::new().apply_status(
            encounter.roster_mut().get_mut(CombatantId(0)).unwrap(),
            StatusType::Slowed,
            3,
        );
        assert_eq!(scout(&encounter), 50.0);

        scheduler.advance(encounter.roster_mut(), 2.0);
        assert_eq!(scout(&encounter), 60.0);
    }

    #[test]
    fn ties_go_to_roster_order() {
        let mut encounter = pair(10.0);
        let mut scheduler = TurnScheduler::new();
        scheduler.advance(encounter.roster_mut(), 15.0);

        assert_eq!(scheduler.next_actor(encounter.roster()), Some(CombatantId(0)));
        assert_eq!(
            scheduler.ready_actors(encounter.roster()),
            vec![CombatantId(0), CombatantId(1)]
        );
    }

    #[test]
    fn dead_combatants_are_frozen_and_never_scheduled() {
        let mut encounter = pair(10.0);
        let mut scheduler = TurnScheduler::new();
        scheduler.fill_action(encounter.roster_mut(), CombatantId(0));
        take_damage(encounter.roster_mut(), CombatantId(0), 1_000.0);

        let dead = encounter.combatant(CombatantId(0)).unwrap();
        assert_eq!(dead.current_action(), dead.max_action());
        assert_eq!(scheduler.next_actor(encounter.roster()), None);

        assert!(!scheduler.reset_action(encounter.roster_mut(), CombatantId(0)));
        let dead = encounter.combatant(CombatantId(0)).unwrap();
        assert_eq!(scheduler.time_until_ready(dead), None);
        assert_eq!(
            scheduler.simulate_trigger(encounter.roster_mut(), CombatantId(0)),
            None
        );
    }

    #[test]
    fn reset_and_fill() {
        let mut encounter = pair(10.0);
        let mut scheduler = TurnScheduler::new();
        scheduler.advance(encounter.roster_mut(), 3.0);

        assert!(scheduler.fill_action(encounter.roster_mut(), CombatantId(1)));
        assert_eq!(scheduler.next_actor(encounter.roster()), Some(CombatantId(1)));

        assert!(scheduler.reset_action(encounter.roster_mut(), CombatantId(1)));
        let slime = encounter.combatant(CombatantId(1)).unwrap();
        assert_eq!(slime.current_action(), 0.0);
        assert_eq!(scheduler.next_actor(encounter.roster()), None);
    }

    #[test]
    fn time_until_next_ready_skips_idle_time() {
        let mut encounter = pair(10.0);
        let mut scheduler = TurnScheduler::new();
        scheduler.advance(encounter.roster_mut(), 4.0);

        let wait = scheduler.time_until_next_ready(encounter.roster()).unwrap();
        assert_eq!(wait, 11.0);
        scheduler.advance(encounter.roster_mut(), wait);
        assert_eq!(scheduler.next_actor(encounter.roster()), Some(CombatantId(0)));
        assert_eq!(scheduler.clock(), 15.0);
    }

    #[test]
    fn stopped_scheduler_neither_advances_nor_schedules() {
        let mut encounter = pair(10.0);
        let mut scheduler = TurnScheduler::new();
        scheduler.fill_action(encounter.roster_mut(), CombatantId(0));
        scheduler.stop();

        scheduler.advance(encounter.roster_mut(), 10.0);
        assert_eq!(encounter.combatant(CombatantId(1)).unwrap().current_action(), 0.0);
        assert_eq!(scheduler.next_actor(encounter.roster()), None);
    }

    #[test]
    fn invalid_elapsed_is_ignored() {
        let mut encounter = pair(10.0);
        let mut scheduler = TurnScheduler::new();
        scheduler.advance(encounter.roster_mut(), -3.0);
        scheduler.advance(encounter.roster_mut(), f32::NAN);
        assert_eq!(scheduler.clock(), 0.0);
        assert_eq!(encounter.combatant(CombatantId(0)).unwrap().current_action(), 0.0);
    }
}
