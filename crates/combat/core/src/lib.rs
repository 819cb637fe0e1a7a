//! Deterministic combat rules for gauge-driven turn battles.
//!
//! `combat-core` owns the canonical rules (status stacking, damage
//! resolution, turn scheduling) and exposes pure APIs reused by the content
//! catalog and the runtime. All state mutation during an encounter flows
//! through [`Encounter`] and the [`ActionContext`] it hands to catalog actions.
pub mod action;
pub mod combat;
pub mod config;
pub mod encounter;
pub mod error;
pub mod event;
pub mod meta;
pub mod scheduler;
pub mod state;
pub mod status;

pub use action::{
    ActionError, ActionProfile, ActionTags, CombatAction, InvalidTargetReason, TargetConstraint,
};
pub use combat::{DamageReport, HealReport, ResourceKind};
pub use config::CombatConfig;
pub use encounter::{
    ActionContext, ActionReport, Encounter, EncounterBuilder, EncounterOutcome, SetupError,
    TurnSummary,
};
pub use error::{CombatError, ErrorSeverity};
pub use event::CombatEvent;
pub use meta::MetaStats;
pub use scheduler::TurnScheduler;
pub use state::{
    ActionGauge, Combatant, CombatantId, CombatantTemplate, Guard, Multipliers, ResourceMeter,
    Roster, Side, StatusSet, StatusType,
};
pub use status::{StatusEngine, StatusOutcome};
