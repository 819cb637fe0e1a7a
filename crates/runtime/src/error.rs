//! Unified error types surfaced by the runtime API.
use std::fmt;

use combat_core::{ActionError, CombatError, CombatantId, ErrorSeverity, SetupError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("action provider channel closed")]
    ActionProviderChannelClosed,

    #[error("scripted provider has no action left for {actor}")]
    ScriptExhausted { actor: CombatantId },

    #[error("provider has no usable action for {actor}")]
    NoUsableAction { actor: CombatantId },

    #[error("action '{name}' is not in the catalog")]
    UnknownAction { name: String },

    #[error("runtime requires an encounter before building")]
    MissingEncounter,

    #[error("runtime requires a catalog before building")]
    MissingCatalog,

    #[error("no living combatant can ever become ready")]
    Stalled,

    #[error("step limit of {max_steps} reached before the encounter ended")]
    StepLimit { max_steps: u32 },

    #[error("turn could not start")]
    Turn(#[source] ActionError),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        use RuntimeError::*;
        match self {
            UnknownAction { .. } | NoUsableAction { .. } => ErrorSeverity::Recoverable,
            ProviderNotSet { .. } | MissingEncounter | MissingCatalog | Setup(_) => {
                ErrorSeverity::Validation
            }
            ActionProviderChannelClosed
            | ScriptExhausted { .. }
            | Stalled
            | StepLimit { .. }
            | Turn(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RuntimeError::*;
        match self {
            ProviderNotSet { .. } => "RUNTIME_PROVIDER_NOT_SET",
            ActionProviderChannelClosed => "RUNTIME_PROVIDER_CHANNEL_CLOSED",
            ScriptExhausted { .. } => "RUNTIME_SCRIPT_EXHAUSTED",
            NoUsableAction { .. } => "RUNTIME_NO_USABLE_ACTION",
            UnknownAction { .. } => "RUNTIME_UNKNOWN_ACTION",
            MissingEncounter => "RUNTIME_MISSING_ENCOUNTER",
            MissingCatalog => "RUNTIME_MISSING_CATALOG",
            Stalled => "RUNTIME_STALLED",
            StepLimit { .. } => "RUNTIME_STEP_LIMIT",
            Turn(_) => "RUNTIME_TURN",
            Setup(_) => "RUNTIME_SETUP",
        }
    }
}

/// Which provider answers for a combatant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Party,
    Enemy,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Party => "party",
            ProviderKind::Enemy => "enemy",
        };
        write!(f, "{}", label)
    }
}
