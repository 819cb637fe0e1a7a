use std::collections::VecDeque;

use async_trait::async_trait;
use combat_content::Catalog;
use combat_core::{CombatantId, Encounter};
use tokio::sync::Mutex;

use super::{ActionChoice, ActionProvider};
use crate::error::{Result, RuntimeError};

/// Replays a fixed list of choices, one per turn, in order.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<ActionChoice>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = ActionChoice>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Choices not yet handed out.
    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn choose_action(
        &self,
        actor: CombatantId,
        _encounter: &Encounter,
        _catalog: &Catalog,
    ) -> Result<ActionChoice> {
        self.script
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted { actor })
    }
}
