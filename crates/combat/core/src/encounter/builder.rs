//! Encounter setup.

use crate::config::CombatConfig;
use crate::error::{CombatError, ErrorSeverity};
use crate::meta::MetaStats;
use crate::state::{ActionGauge, Combatant, CombatantId, CombatantTemplate, Roster, Side};

use super::Encounter;

/// Errors raised while building an encounter.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SetupError {
    /// Party and enemies together exceed the roster capacity.
    #[error("Too many combatants (max: {max}, requested: {requested})")]
    TooManyCombatants {
        /// Maximum capacity.
        max: usize,
        /// Party plus enemies.
        requested: usize,
    },

    /// No party member was added.
    #[error("Encounter has no party members")]
    NoParty,

    /// No enemy was added.
    #[error("Encounter has no enemies")]
    NoEnemies,

    /// A template carries an unusable value.
    #[error("Invalid template '{name}': {reason}")]
    InvalidTemplate {
        /// Template name.
        name: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl CombatError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use SetupError::*;
        match self {
            TooManyCombatants { .. } => "SETUP_TOO_MANY_COMBATANTS",
            NoParty => "SETUP_NO_PARTY",
            NoEnemies => "SETUP_NO_ENEMIES",
            InvalidTemplate { .. } => "SETUP_INVALID_TEMPLATE",
        }
    }
}

/// Collects templates and builds an [`Encounter`].
///
/// Roster order (and therefore turn priority on ties) is party in insertion
/// order, then enemies in insertion order.
///
/// Each combatant's base gauge rate resolves as: the template's own
/// `base_rate`, else the meta-stat rate for its class, else
/// [`CombatConfig::base_rate`].
pub struct EncounterBuilder<'a> {
    party: Vec<CombatantTemplate>,
    enemies: Vec<CombatantTemplate>,
    config: CombatConfig,
    meta: Option<&'a dyn MetaStats>,
}

impl EncounterBuilder<'static> {
    pub fn new() -> Self {
        Self {
            party: Vec::new(),
            enemies: Vec::new(),
            config: CombatConfig::default(),
            meta: None,
        }
    }
}

impl Default for EncounterBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> EncounterBuilder<'a> {
    pub fn party(mut self, template: CombatantTemplate) -> Self {
        self.party.push(template);
        self
    }

    pub fn enemy(mut self, template: CombatantTemplate) -> Self {
        self.enemies.push(template);
        self
    }

    pub fn party_members(mut self, templates: impl IntoIterator<Item = CombatantTemplate>) -> Self {
        self.party.extend(templates);
        self
    }

    pub fn enemies(mut self, templates: impl IntoIterator<Item = CombatantTemplate>) -> Self {
        self.enemies.extend(templates);
        self
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Attaches a meta-stat source. It is only read inside [`build`](Self::build).
    pub fn meta_stats<'b>(self, meta: &'b dyn MetaStats) -> EncounterBuilder<'b> {
        EncounterBuilder {
            party: self.party,
            enemies: self.enemies,
            config: self.config,
            meta: Some(meta),
        }
    }

    pub fn build(self) -> Result<Encounter, SetupError> {
        if self.party.is_empty() {
            return Err(SetupError::NoParty);
        }
        if self.enemies.is_empty() {
            return Err(SetupError::NoEnemies);
        }
        let requested = self.party.len() + self.enemies.len();
        if requested > CombatConfig::MAX_COMBATANTS {
            return Err(SetupError::TooManyCombatants {
                max: CombatConfig::MAX_COMBATANTS,
                requested,
            });
        }

        let sides = self
            .party
            .iter()
            .map(|t| (Side::Ally, t))
            .chain(self.enemies.iter().map(|t| (Side::Enemy, t)));

        let mut combatants = Vec::with_capacity(requested);
        for (index, (side, template)) in sides.enumerate() {
            let gauge = self.gauge_for(template)?;
            let id = CombatantId(index as u32);
            tracing::trace!(
                %id,
                name = %template.name,
                %side,
                rate = gauge.base_rate(),
                "combatant joined"
            );
            combatants.push(Combatant::new(id, side, template, gauge));
        }

        tracing::debug!(
            party = self.party.len(),
            enemies = self.enemies.len(),
            "encounter built"
        );
        Ok(Encounter::from_roster(
            Roster::from_ordered(combatants),
            self.config,
        ))
    }

    fn gauge_for(&self, template: &CombatantTemplate) -> Result<ActionGauge, SetupError> {
        let invalid = |reason| SetupError::InvalidTemplate {
            name: template.name.clone(),
            reason,
        };

        if !template.max_health.is_finite() || template.max_health <= 0.0 {
            return Err(invalid("max_health must be positive"));
        }
        if !template.max_sanity.is_finite() || template.max_sanity < 0.0 {
            return Err(invalid("max_sanity must not be negative"));
        }

        let max_action = template.max_action.unwrap_or(self.config.max_action);
        if !max_action.is_finite() || max_action <= 0.0 {
            return Err(invalid("max_action must be positive"));
        }

        let base_rate = template
            .base_rate
            .or_else(|| {
                let class = template.class.as_deref()?;
                self.meta?.base_action_rate(class)
            })
            .unwrap_or(self.config.base_rate);
        if !base_rate.is_finite() || base_rate < 0.0 {
            return Err(invalid("base_rate must not be negative"));
        }

        Ok(ActionGauge::new(max_action, base_rate))
    }
}
