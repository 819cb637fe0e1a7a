//! The surface an action strategy uses to change the encounter.

use crate::action::ActionError;
use crate::combat::{self, DamageReport, HealReport};
use crate::event::CombatEvent;
use crate::scheduler::TurnScheduler;
use crate::state::{Combatant, CombatantId, Guard, Roster, StatusType};
use crate::status::{StatusEngine, StatusOutcome};

/// Mutable view of an encounter handed to [`CombatAction::apply`].
///
/// Every mutation goes through the status engine, the damage pipeline or the
/// scheduler, and records the matching [`CombatEvent`]. There is no way to
/// write multipliers or gauges directly.
///
/// [`CombatAction::apply`]: crate::action::CombatAction::apply
pub struct ActionContext<'a> {
    roster: &'a mut Roster,
    statuses: &'a StatusEngine,
    scheduler: &'a TurnScheduler,
    events: &'a mut Vec<CombatEvent>,
}

impl<'a> ActionContext<'a> {
    pub(crate) fn new(
        roster: &'a mut Roster,
        statuses: &'a StatusEngine,
        scheduler: &'a TurnScheduler,
        events: &'a mut Vec<CombatEvent>,
    ) -> Self {
        Self {
            roster,
            statuses,
            scheduler,
            events,
        }
    }

    // ===== queries =====

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    pub fn living_enemies_of(&self, id: CombatantId) -> Vec<CombatantId> {
        self.roster.living_enemies_of(id)
    }

    pub fn living_allies_of(&self, id: CombatantId) -> Vec<CombatantId> {
        self.roster.living_allies_of(id)
    }

    /// `base × source.attack_multiplier`. An unknown source deals `base`.
    pub fn calculate_damage(&self, base: f32, source: CombatantId) -> f32 {
        self.roster
            .get(source)
            .map_or(base, |c| combat::calculate_damage(base, c))
    }

    // ===== damage and healing =====

    pub fn take_damage(&mut self, target: CombatantId, amount: f32) -> Option<DamageReport> {
        let report = combat::take_damage(self.roster, target, amount)?;
        self.events.push(CombatEvent::DamageApplied {
            target: report.target,
            receiver: report.receiver,
            amount: report.applied,
            remaining_health: report.remaining_health,
        });

        if report.killed {
            tracing::debug!(combatant = %report.receiver, "combatant died");
            self.events.push(CombatEvent::Died {
                combatant: report.receiver,
            });
            if combat::clear_guard(self.roster, report.receiver).is_some() {
                self.events.push(CombatEvent::GuardCleared {
                    guardian: report.receiver,
                });
            }
        }
        Some(report)
    }

    pub fn heal_health(&mut self, target: CombatantId, amount: f32) -> Option<HealReport> {
        let report = combat::heal_health(self.roster, target, amount)?;
        self.push_heal(&report);
        Some(report)
    }

    pub fn heal_sanity(&mut self, target: CombatantId, amount: f32) -> Option<HealReport> {
        let report = combat::heal_sanity(self.roster, target, amount)?;
        self.push_heal(&report);
        Some(report)
    }

    fn push_heal(&mut self, report: &HealReport) {
        self.events.push(CombatEvent::Healed {
            target: report.target,
            resource: report.resource,
            amount: report.applied,
            current: report.current,
        });
    }

    // ===== statuses =====

    pub fn apply_status(
        &mut self,
        target: CombatantId,
        status: StatusType,
        duration: u32,
    ) -> StatusOutcome {
        let Some(combatant) = self.roster.get_mut(target) else {
            tracing::warn!(%target, %status, "status dropped: unknown target");
            return StatusOutcome::Ignored;
        };

        let outcome = self.statuses.apply_status(combatant, status, duration);
        let event = match outcome {
            StatusOutcome::Applied { remaining_turns } => Some(CombatEvent::StatusApplied {
                target,
                status,
                remaining_turns,
            }),
            StatusOutcome::Refreshed { remaining_turns } => Some(CombatEvent::StatusRefreshed {
                target,
                status,
                remaining_turns,
            }),
            StatusOutcome::Cancelled { removed } => Some(CombatEvent::StatusCancelled {
                target,
                attempted: status,
                removed,
            }),
            StatusOutcome::Ignored => None,
        };
        self.events.extend(event);
        outcome
    }

    pub fn remove_status(&mut self, target: CombatantId, status: StatusType) -> bool {
        let removed = self
            .roster
            .get_mut(target)
            .is_some_and(|c| self.statuses.remove_status(c, status));
        if removed {
            self.events.push(CombatEvent::StatusRemoved { target, status });
        }
        removed
    }

    pub fn clear_statuses(&mut self, target: CombatantId) -> Vec<StatusType> {
        let removed = match self.roster.get_mut(target) {
            Some(combatant) => self.statuses.clear_all_statuses(combatant),
            None => Vec::new(),
        };
        self.push_removed(target, &removed);
        removed
    }

    /// Removes every debuff from `target`, keeping buffs.
    pub fn clear_negative_statuses(&mut self, target: CombatantId) -> Vec<StatusType> {
        let removed = match self.roster.get_mut(target) {
            Some(combatant) => self.statuses.clear_negative_statuses(combatant),
            None => Vec::new(),
        };
        self.push_removed(target, &removed);
        removed
    }

    fn push_removed(&mut self, target: CombatantId, removed: &[StatusType]) {
        self.events.extend(
            removed
                .iter()
                .map(|&status| CombatEvent::StatusRemoved { target, status }),
        );
    }

    // ===== gauge =====

    pub fn reset_action(&mut self, target: CombatantId) -> bool {
        self.scheduler.reset_action(self.roster, target)
    }

    pub fn fill_action(&mut self, target: CombatantId) -> bool {
        self.scheduler.fill_action(self.roster, target)
    }

    // ===== guard =====

    pub fn activate_guard(&mut self, guardian: CombatantId) -> Result<Guard, ActionError> {
        let guard = combat::activate_guard(self.roster, guardian)?;
        self.events.push(CombatEvent::GuardSet { guardian, guard });
        Ok(guard)
    }

    pub fn guard_ally(
        &mut self,
        guardian: CombatantId,
        ally: CombatantId,
    ) -> Result<Guard, ActionError> {
        let guard = combat::guard_ally(self.roster, guardian, ally)?;
        self.events.push(CombatEvent::GuardSet { guardian, guard });
        Ok(guard)
    }
}
