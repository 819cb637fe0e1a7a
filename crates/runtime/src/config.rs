//! Runtime configuration.

use combat_core::CombatConfig;

/// Runtime configuration shared by the orchestrator and the event bus.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Gauge tuning handed to encounter setup.
    pub combat: CombatConfig,
    /// Simulated time advanced per idle step when `skip_idle_time` is off.
    pub timestep: f32,
    /// Jump straight to the next ready combatant instead of ticking.
    pub skip_idle_time: bool,
    /// Hard cap on steps for [`Runtime::run`](crate::Runtime::run).
    pub max_steps: u32,
    /// Broadcast capacity per event topic.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            timestep: 1.0,
            skip_idle_time: true,
            max_steps: 10_000,
            event_buffer_size: 256,
        }
    }
}

impl RuntimeConfig {
    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self.skip_idle_time = false;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }
}
