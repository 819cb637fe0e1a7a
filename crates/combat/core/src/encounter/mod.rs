//! Encounter: the aggregate that owns one combat from setup to outcome.
//!
//! An [`Encounter`] owns the roster, its [`StatusEngine`] and its
//! [`TurnScheduler`]; none of them are global. The turn lifecycle is
//!
//! ```text
//! advance(elapsed) ──► next_actor ──► begin_turn ──► perform ──► end_turn
//!        ▲                                                         │
//!        └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Every observable change is recorded as a [`CombatEvent`] and drained by
//! the caller.

mod builder;
mod context;
mod outcome;

pub use builder::{EncounterBuilder, SetupError};
pub use context::ActionContext;
pub use outcome::EncounterOutcome;

use crate::action::{ActionError, CombatAction, resolve_target};
use crate::combat::{self, ResourceKind};
use crate::config::CombatConfig;
use crate::event::CombatEvent;
use crate::scheduler::TurnScheduler;
use crate::state::{Combatant, CombatantId, Roster, StatusType};
use crate::status::StatusEngine;

/// Summary of a successfully resolved action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    pub user: CombatantId,
    pub action: String,
    pub target: Option<CombatantId>,
    pub sanity_spent: f32,
}

/// Summary of a completed turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnSummary {
    pub actor: CombatantId,
    pub expired: Vec<StatusType>,
}

/// One combat, from setup to outcome.
#[derive(Clone, Debug)]
pub struct Encounter {
    roster: Roster,
    statuses: StatusEngine,
    scheduler: TurnScheduler,
    config: CombatConfig,
    current: Option<CombatantId>,
    acted: bool,
    turn: u32,
    outcome: Option<EncounterOutcome>,
    events: Vec<CombatEvent>,
}

impl Encounter {
    pub fn builder() -> EncounterBuilder<'static> {
        EncounterBuilder::new()
    }

    pub(crate) fn from_roster(roster: Roster, config: CombatConfig) -> Self {
        Self {
            roster,
            statuses: StatusEngine::new(),
            scheduler: TurnScheduler::new(),
            config,
            current: None,
            acted: false,
            turn: 0,
            outcome: None,
            events: Vec::new(),
        }
    }

    // ===== read access =====

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[cfg(test)]
    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    pub fn living_enemies_of(&self, id: CombatantId) -> Vec<CombatantId> {
        self.roster.living_enemies_of(id)
    }

    pub fn living_allies_of(&self, id: CombatantId) -> Vec<CombatantId> {
        self.roster.living_allies_of(id)
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn status_engine(&self) -> &StatusEngine {
        &self.statuses
    }

    /// The combatant whose turn is in progress.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.current
    }

    /// Number of completed turns.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<&EncounterOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    // ===== events =====

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== scheduling =====

    /// Advances simulated time and returns the next ready combatant, if any.
    ///
    /// Time does not pass while a turn is in progress or after the end.
    pub fn advance(&mut self, elapsed: f32) -> Option<CombatantId> {
        if self.current.is_some() {
            tracing::warn!(elapsed, "advance ignored: a turn is in progress");
            return None;
        }
        self.scheduler.advance(&mut self.roster, elapsed);
        self.next_actor()
    }

    /// Skips straight to the moment the next combatant becomes ready.
    pub fn advance_to_next_turn(&mut self) -> Option<CombatantId> {
        if let Some(ready) = self.next_actor() {
            return Some(ready);
        }
        let wait = self.scheduler.time_until_next_ready(&self.roster)?;
        self.advance(wait)
    }

    pub fn next_actor(&self) -> Option<CombatantId> {
        self.scheduler.next_actor(&self.roster)
    }

    /// Forces `id` ready. Returns `None` for dead or unknown combatants.
    pub fn simulate_trigger(&mut self, id: CombatantId) -> Option<CombatantId> {
        self.scheduler.simulate_trigger(&mut self.roster, id)
    }

    // ===== turn lifecycle =====

    /// Starts the turn of a ready combatant.
    ///
    /// Any guard the combatant was holding ends here.
    pub fn begin_turn(&mut self, id: CombatantId) -> Result<(), ActionError> {
        if self.is_finished() {
            return Err(ActionError::EncounterFinished);
        }
        if let Some(current) = self.current {
            if current != id {
                return Err(ActionError::NotCurrentActor {
                    user: id,
                    current: Some(current),
                });
            }
            return Ok(());
        }

        let combatant = self
            .roster
            .get(id)
            .ok_or(ActionError::UnknownCombatant { id })?;
        if combatant.is_dead() {
            return Err(ActionError::UserDead { user: id });
        }
        if !combatant.gauge().is_full() {
            return Err(ActionError::NotReady { user: id });
        }

        self.current = Some(id);
        self.acted = false;
        if combat::clear_guard(&mut self.roster, id).is_some() {
            self.events.push(CombatEvent::GuardCleared { guardian: id });
        }
        tracing::debug!(combatant = %id, turn = self.turn, "turn ready");
        self.events.push(CombatEvent::TurnReady {
            combatant: id,
            turn: self.turn,
        });
        Ok(())
    }

    /// Resolves `action` used by the current actor.
    ///
    /// Validation runs in order: encounter running, `user` is the current
    /// actor and has not acted yet, `user` alive, target resolution, sanity
    /// pre-check. A validation failure mutates nothing and leaves the turn
    /// open for another choice.
    ///
    /// Once validation passes the action resolves and the turn's action is
    /// spent, even if the strategy fails partway. Effects it applied before
    /// failing stay applied and no cost is paid. Every failure is logged and
    /// recorded as an `ActionRejected` event.
    pub fn perform(
        &mut self,
        action: &dyn CombatAction,
        user: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<ActionReport, ActionError> {
        match self.try_perform(action, user, target) {
            Ok(report) => Ok(report),
            Err(error) => {
                tracing::warn!(%user, action = action.name(), %error, "action rejected");
                self.events.push(CombatEvent::ActionRejected {
                    user,
                    action: action.name().to_owned(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    fn try_perform(
        &mut self,
        action: &dyn CombatAction,
        user: CombatantId,
        target: Option<CombatantId>,
    ) -> Result<ActionReport, ActionError> {
        if self.is_finished() {
            return Err(ActionError::EncounterFinished);
        }
        if self.current != Some(user) {
            return Err(ActionError::NotCurrentActor {
                user,
                current: self.current,
            });
        }
        if self.acted {
            return Err(ActionError::NotReady { user });
        }

        let actor = self
            .roster
            .get(user)
            .ok_or(ActionError::UnknownCombatant { id: user })?;
        if actor.is_dead() {
            return Err(ActionError::UserDead { user });
        }

        let profile = action.profile();
        let target = resolve_target(&self.roster, profile, user, target)?;

        let cost = profile.cost.max(0.0);
        if actor.sanity() < cost {
            return Err(ActionError::InsufficientResource {
                user,
                resource: ResourceKind::Sanity,
                required: cost,
                available: actor.sanity(),
            });
        }

        let mut ctx = ActionContext::new(
            &mut self.roster,
            &self.statuses,
            &self.scheduler,
            &mut self.events,
        );
        let resolved = action.apply(&mut ctx, user, target);
        self.acted = true;
        if let Err(error) = resolved {
            self.check_outcome();
            return Err(error);
        }

        let sanity_spent = if cost > 0.0 {
            combat::spend_sanity(&mut self.roster, user, cost).unwrap_or_else(|error| {
                tracing::warn!(%user, %error, "action cost could not be paid after resolution");
                0.0
            })
        } else {
            0.0
        };

        tracing::debug!(%user, action = action.name(), ?target, sanity_spent, "action used");
        self.events.push(CombatEvent::ActionUsed {
            user,
            action: profile.name.clone(),
            target,
        });
        self.check_outcome();

        Ok(ActionReport {
            user,
            action: profile.name.clone(),
            target,
            sanity_spent,
        })
    }

    /// Finishes the current turn: ticks the actor's statuses and empties its
    /// gauge. Returns `None` if no turn was in progress.
    pub fn end_turn(&mut self) -> Option<TurnSummary> {
        let Some(actor) = self.current.take() else {
            if !self.is_finished() {
                tracing::warn!("end_turn called without a turn in progress");
            }
            return None;
        };

        let mut expired = Vec::new();
        if let Some(combatant) = self.roster.living_mut(actor) {
            expired.extend(self.statuses.tick_turn_end(combatant));
        }
        self.events.extend(
            expired
                .iter()
                .map(|&status| CombatEvent::StatusExpired {
                    target: actor,
                    status,
                }),
        );

        self.scheduler.reset_action(&mut self.roster, actor);
        self.turn += 1;
        self.acted = false;
        self.check_outcome();

        Some(TurnSummary { actor, expired })
    }

    /// Stops the encounter from outside. Effects already applied stay.
    pub fn abort(&mut self, reason: impl Into<String>) {
        if self.is_finished() {
            return;
        }
        let reason = reason.into();
        tracing::info!(%reason, "encounter aborted");
        self.finish(EncounterOutcome::Aborted { reason });
    }

    fn check_outcome(&mut self) {
        if self.is_finished() {
            return;
        }
        if let Some(outcome) = EncounterOutcome::evaluate(&self.roster) {
            tracing::info!(%outcome, turn = self.turn, "encounter ended");
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: EncounterOutcome) {
        self.scheduler.stop();
        self.current = None;
        self.outcome = Some(outcome.clone());
        self.events.push(CombatEvent::EncounterEnded { outcome });
    }
}
