//! Combatant state.
//!
//! A combatant is a data holder: every mutation goes through the status engine,
//! the damage pipeline or the turn scheduler, which is why all writers here
//! are `pub(crate)`.

use super::common::{CombatantId, ResourceMeter, Side};
use super::status::{StatusSet, StatusType};

/// Derived combat multipliers. Baseline is 1.0 for every field.
///
/// Always a pure fold of the active status set; see
/// [`StatusEngine::recompute`](crate::status::StatusEngine::recompute).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Multipliers {
    pub attack: f32,
    /// Scales damage taken: below 1.0 is tougher, above 1.0 more fragile.
    pub defense: f32,
    pub action_speed: f32,
}

impl Multipliers {
    pub const BASELINE: Self = Self {
        attack: 1.0,
        defense: 1.0,
        action_speed: 1.0,
    };
}

impl Default for Multipliers {
    fn default() -> Self {
        Self::BASELINE
    }
}

const FULL_TOLERANCE: f32 = 1e-5;

/// Action gauge. Fills over time; a full gauge grants a turn.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionGauge {
    current: f32,
    maximum: f32,
    base_rate: f32,
}

impl ActionGauge {
    pub fn new(maximum: f32, base_rate: f32) -> Self {
        Self {
            current: 0.0,
            maximum: maximum.max(0.0),
            base_rate: base_rate.max(0.0),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn base_rate(&self) -> f32 {
        self.base_rate
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Adds `amount`, clamped at the maximum. A gauge within rounding error
    /// of full counts as full, so skipping ahead by the exact remaining time
    /// always lands on a ready gauge.
    pub(crate) fn fill_by(&mut self, amount: f32) {
        let filled = self.current + amount.max(0.0);
        self.current = if self.maximum - filled <= self.maximum * FULL_TOLERANCE {
            self.maximum
        } else {
            filled
        };
    }

    pub(crate) fn fill(&mut self) {
        self.current = self.maximum;
    }

    pub(crate) fn reset(&mut self) {
        self.current = 0.0;
    }
}

/// Who a guardian is protecting.
///
/// The relation lives on the guardian and is a lookup, not ownership. It is
/// consumed when the guardian begins its next turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Guard {
    /// Covers every other living member of the guardian's side.
    Side,
    /// Covers one specific ally (never the guardian itself).
    Ally(CombatantId),
}

impl Guard {
    /// Returns true if this guard redirects hits aimed at `target`.
    pub fn covers(&self, guardian: CombatantId, target: CombatantId) -> bool {
        match *self {
            Guard::Side => guardian != target,
            Guard::Ally(ally) => ally == target,
        }
    }
}

/// Initial stats for one combatant, supplied by the encounter setup collaborator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,

    /// Meta-stat key (character class) used to look up the base action rate.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: Option<String>,

    pub max_health: f32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub max_sanity: f32,

    /// Gauge capacity; falls back to [`CombatConfig::max_action`](crate::CombatConfig).
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_action: Option<f32>,

    /// Gauge fill per unit of time; falls back to meta stats, then config.
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_rate: Option<f32>,
}

impl CombatantTemplate {
    pub fn new(name: impl Into<String>, max_health: f32, max_sanity: f32) -> Self {
        Self {
            name: name.into(),
            class: None,
            max_health,
            max_sanity,
            max_action: None,
            base_rate: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_base_rate(mut self, base_rate: f32) -> Self {
        self.base_rate = Some(base_rate);
        self
    }

    pub fn with_max_action(mut self, max_action: f32) -> Self {
        self.max_action = Some(max_action);
        self
    }
}

/// Complete state of one combatant for the duration of an encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Combatant {
    id: CombatantId,
    name: String,
    side: Side,
    class: Option<String>,
    health: ResourceMeter,
    sanity: ResourceMeter,
    multipliers: Multipliers,
    gauge: ActionGauge,
    guard: Option<Guard>,
    statuses: StatusSet,
}

impl Combatant {
    pub(crate) fn new(
        id: CombatantId,
        side: Side,
        template: &CombatantTemplate,
        gauge: ActionGauge,
    ) -> Self {
        Self {
            id,
            name: template.name.clone(),
            side,
            class: template.class.clone(),
            health: ResourceMeter::full(template.max_health),
            sanity: ResourceMeter::full(template.max_sanity),
            multipliers: Multipliers::BASELINE,
            gauge,
            guard: None,
            statuses: StatusSet::empty(),
        }
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn health(&self) -> f32 {
        self.health.current()
    }

    pub fn max_health(&self) -> f32 {
        self.health.maximum()
    }

    pub fn sanity(&self) -> f32 {
        self.sanity.current()
    }

    pub fn max_sanity(&self) -> f32 {
        self.sanity.maximum()
    }

    /// Derived predicate: a combatant is dead once its health reaches zero.
    pub fn is_dead(&self) -> bool {
        self.health.is_empty()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    pub fn attack_multiplier(&self) -> f32 {
        self.multipliers.attack
    }

    pub fn defense_multiplier(&self) -> f32 {
        self.multipliers.defense
    }

    pub fn action_speed_multiplier(&self) -> f32 {
        self.multipliers.action_speed
    }

    pub fn gauge(&self) -> &ActionGauge {
        &self.gauge
    }

    pub fn current_action(&self) -> f32 {
        self.gauge.current()
    }

    pub fn max_action(&self) -> f32 {
        self.gauge.maximum()
    }

    pub fn guard(&self) -> Option<Guard> {
        self.guard
    }

    pub fn statuses(&self) -> &StatusSet {
        &self.statuses
    }

    pub fn has_status(&self, kind: StatusType) -> bool {
        self.statuses.has(kind)
    }

    pub(crate) fn health_mut(&mut self) -> &mut ResourceMeter {
        &mut self.health
    }

    pub(crate) fn sanity_mut(&mut self) -> &mut ResourceMeter {
        &mut self.sanity
    }

    pub(crate) fn gauge_mut(&mut self) -> &mut ActionGauge {
        &mut self.gauge
    }

    pub(crate) fn statuses_mut(&mut self) -> &mut StatusSet {
        &mut self.statuses
    }

    pub(crate) fn set_multipliers(&mut self, multipliers: Multipliers) {
        self.multipliers = multipliers;
    }

    pub(crate) fn set_guard(&mut self, guard: Option<Guard>) {
        self.guard = guard;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_starts_at_full_resources() {
        let template = CombatantTemplate::new("Mira", 80.0, 40.0);
        let gauge = ActionGauge::new(100.0, 10.0);
        let c = Combatant::new(CombatantId(0), Side::Ally, &template, gauge);

        assert_eq!(c.health(), 80.0);
        assert_eq!(c.sanity(), 40.0);
        assert_eq!(c.multipliers(), Multipliers::BASELINE);
        assert_eq!(c.current_action(), 0.0);
        assert!(c.is_alive());
        assert!(c.statuses().is_empty());
    }

    #[test]
    fn gauge_fill_clamps_at_maximum() {
        let mut gauge = ActionGauge::new(100.0, 10.0);
        gauge.fill_by(70.0);
        gauge.fill_by(70.0);
        assert_eq!(gauge.current(), 100.0);
        assert!(gauge.is_full());

        gauge.reset();
        assert_eq!(gauge.current(), 0.0);
    }

    #[test]
    fn gauge_within_rounding_of_full_is_full() {
        let mut gauge = ActionGauge::new(100.0, 14.0);
        gauge.fill_by(14.0 * (100.0 / 14.0));
        assert!(gauge.is_full());

        let mut gauge = ActionGauge::new(100.0, 10.0);
        gauge.fill_by(99.0);
        assert!(!gauge.is_full());
    }

    #[test]
    fn guard_never_covers_the_guardian() {
        let guardian = CombatantId(1);
        assert!(!Guard::Side.covers(guardian, guardian));
        assert!(Guard::Side.covers(guardian, CombatantId(2)));
        assert!(Guard::Ally(CombatantId(2)).covers(guardian, CombatantId(2)));
        assert!(!Guard::Ally(CombatantId(2)).covers(guardian, CombatantId(3)));
    }
}
