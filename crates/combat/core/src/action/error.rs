//! Errors raised while validating or resolving an action.

use crate::combat::ResourceKind;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::CombatantId;

/// Why a target was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InvalidTargetReason {
    /// The action requires a target and none was given.
    Missing,
    /// No combatant with that id in this encounter.
    Unknown,
    /// The target is already dead.
    Dead,
    /// The target is on the wrong side for this action.
    WrongSide,
    /// The action cannot target its own user.
    SelfNotAllowed,
}

/// Errors surfaced when a combatant uses an action.
///
/// None of these are fatal: the action becomes a no-op and the encounter
/// continues.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("invalid target {target:?} for {user}: {reason}")]
    InvalidTarget {
        user: CombatantId,
        target: Option<CombatantId>,
        reason: InvalidTargetReason,
    },

    #[error("{user} needs {required} {resource} but has {available}")]
    InsufficientResource {
        user: CombatantId,
        resource: ResourceKind,
        required: f32,
        available: f32,
    },

    #[error("combatant {id} does not exist")]
    UnknownCombatant { id: CombatantId },

    #[error("combatant {user} is dead and cannot act")]
    UserDead { user: CombatantId },

    #[error("combatant {user} is not the current actor (current: {current:?})")]
    NotCurrentActor {
        user: CombatantId,
        current: Option<CombatantId>,
    },

    #[error("combatant {user} is not ready to act")]
    NotReady { user: CombatantId },

    #[error("the encounter has already ended")]
    EncounterFinished,
}

impl CombatError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidTarget { .. } | Self::InsufficientResource { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownCombatant { .. }
            | Self::UserDead { .. }
            | Self::NotCurrentActor { .. }
            | Self::NotReady { .. }
            | Self::EncounterFinished => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            Self::InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            Self::UnknownCombatant { .. } => "ACTION_UNKNOWN_COMBATANT",
            Self::UserDead { .. } => "ACTION_USER_DEAD",
            Self::NotCurrentActor { .. } => "ACTION_NOT_CURRENT_ACTOR",
            Self::NotReady { .. } => "ACTION_NOT_READY",
            Self::EncounterFinished => "ACTION_ENCOUNTER_FINISHED",
        }
    }
}
