//! Outcome events for presentation consumers.
//!
//! The encounter records one event per observable change. Consumers (UI,
//! logs, the runtime event bus) read them after the fact and never mutate
//! combat state.

use crate::action::ActionError;
use crate::combat::ResourceKind;
use crate::encounter::EncounterOutcome;
use crate::state::{CombatantId, Guard, StatusType};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum CombatEvent {
    /// Damage aimed at `target` was taken by `receiver` (the guardian when redirected).
    DamageApplied {
        target: CombatantId,
        receiver: CombatantId,
        amount: f32,
        remaining_health: f32,
    },
    Healed {
        target: CombatantId,
        resource: ResourceKind,
        amount: f32,
        current: f32,
    },
    StatusApplied {
        target: CombatantId,
        status: StatusType,
        remaining_turns: u32,
    },
    StatusRefreshed {
        target: CombatantId,
        status: StatusType,
        remaining_turns: u32,
    },
    /// `attempted` met its opposite `removed`; neither is active now.
    StatusCancelled {
        target: CombatantId,
        attempted: StatusType,
        removed: StatusType,
    },
    StatusRemoved {
        target: CombatantId,
        status: StatusType,
    },
    StatusExpired {
        target: CombatantId,
        status: StatusType,
    },
    GuardSet {
        guardian: CombatantId,
        guard: Guard,
    },
    GuardCleared {
        guardian: CombatantId,
    },
    Died {
        combatant: CombatantId,
    },
    TurnReady {
        combatant: CombatantId,
        turn: u32,
    },
    ActionUsed {
        user: CombatantId,
        action: String,
        target: Option<CombatantId>,
    },
    ActionRejected {
        user: CombatantId,
        action: String,
        error: ActionError,
    },
    EncounterEnded {
        outcome: EncounterOutcome,
    },
}

impl CombatEvent {
    /// True for events that belong to the turn lifecycle rather than to an
    /// effect resolution.
    pub fn is_turn_event(&self) -> bool {
        matches!(
            self,
            Self::TurnReady { .. } | Self::StatusExpired { .. } | Self::EncounterEnded { .. }
        )
    }

    /// Short snake_case name, used as a log field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DamageApplied { .. } => "damage_applied",
            Self::Healed { .. } => "healed",
            Self::StatusApplied { .. } => "status_applied",
            Self::StatusRefreshed { .. } => "status_refreshed",
            Self::StatusCancelled { .. } => "status_cancelled",
            Self::StatusRemoved { .. } => "status_removed",
            Self::StatusExpired { .. } => "status_expired",
            Self::GuardSet { .. } => "guard_set",
            Self::GuardCleared { .. } => "guard_cleared",
            Self::Died { .. } => "died",
            Self::TurnReady { .. } => "turn_ready",
            Self::ActionUsed { .. } => "action_used",
            Self::ActionRejected { .. } => "action_rejected",
            Self::EncounterEnded { .. } => "encounter_ended",
        }
    }
}
