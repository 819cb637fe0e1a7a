//! Asynchronous abstraction for sourcing combatant intent.
//!
//! The runtime asks an [`ActionProvider`] for every turn, so encounters can
//! run with human input, scripted fixtures, or AI policies.

mod channel;
mod scripted;
mod tactical;

use async_trait::async_trait;
use combat_content::Catalog;
use combat_core::{CombatantId, Encounter};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use channel::ChannelProvider;
pub use scripted::ScriptedProvider;
pub use tactical::TacticalProvider;

/// A catalog action name and its optional target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionChoice {
    pub action: String,
    pub target: Option<CombatantId>,
}

impl ActionChoice {
    pub fn new(action: impl Into<String>, target: Option<CombatantId>) -> Self {
        Self {
            action: action.into(),
            target,
        }
    }

    pub fn on(action: impl Into<String>, target: CombatantId) -> Self {
        Self::new(action, Some(target))
    }

    pub fn untargeted(action: impl Into<String>) -> Self {
        Self::new(action, None)
    }
}

/// Trait for choosing actions based on the current encounter.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Enemy AI decisions
/// - Scripted/replayed turns
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Choose an action for `actor`, whose turn has just begun.
    ///
    /// The encounter is read-only here; the runtime validates and performs
    /// the returned choice.
    async fn choose_action(
        &self,
        actor: CombatantId,
        encounter: &Encounter,
        catalog: &Catalog,
    ) -> Result<ActionChoice>;
}
