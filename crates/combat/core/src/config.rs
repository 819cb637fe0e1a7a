/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Gauge capacity used when a template does not specify its own.
    pub max_action: f32,

    /// Gauge fill per unit of time (before speed multipliers) used when neither
    /// the template nor the meta-stat source provides one.
    pub base_rate: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of combatants in one encounter (party + enemies).
    pub const MAX_COMBATANTS: usize = 16;
    /// One slot per [`StatusType`](crate::StatusType); at most one entry per type.
    pub const MAX_STATUS_EFFECTS: usize = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_ACTION: f32 = 100.0;
    pub const DEFAULT_BASE_RATE: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            max_action: Self::DEFAULT_MAX_ACTION,
            base_rate: Self::DEFAULT_BASE_RATE,
        }
    }

    pub fn with_base_rate(mut self, base_rate: f32) -> Self {
        self.base_rate = base_rate;
        self
    }

    pub fn with_max_action(mut self, max_action: f32) -> Self {
        self.max_action = max_action;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
