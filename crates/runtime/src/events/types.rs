//! Runtime-level event types.

use combat_core::CombatantId;
use serde::{Deserialize, Serialize};

/// Turn flow as seen by the runtime loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnEvent {
    /// The provider for `actor` is being asked for an action.
    Prompted {
        actor: CombatantId,
        turn: u32,
        clock: f32,
    },

    /// The turn ended without an action taking effect.
    Forfeited { actor: CombatantId, reason: String },

    /// Simulated time passed with nobody ready.
    Idle { clock: f32 },
}
