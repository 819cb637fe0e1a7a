use async_trait::async_trait;
use combat_content::Catalog;
use combat_core::{CombatantId, Encounter};
use tokio::sync::{Mutex, mpsc};

use super::{ActionChoice, ActionProvider};
use crate::error::{Result, RuntimeError};

/// Waits for choices sent from another task, such as an input loop.
pub struct ChannelProvider {
    rx: Mutex<mpsc::Receiver<ActionChoice>>,
}

impl ChannelProvider {
    /// Creates the provider and the sender used to feed it.
    pub fn new(buffer: usize) -> (Self, mpsc::Sender<ActionChoice>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { rx: Mutex::new(rx) }, tx)
    }
}

#[async_trait]
impl ActionProvider for ChannelProvider {
    async fn choose_action(
        &self,
        actor: CombatantId,
        _encounter: &Encounter,
        _catalog: &Catalog,
    ) -> Result<ActionChoice> {
        tracing::debug!(%actor, "waiting for action input");
        self.rx
            .lock()
            .await
            .recv()
            .await
            .ok_or(RuntimeError::ActionProviderChannelClosed)
    }
}
