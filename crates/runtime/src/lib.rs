//! Runtime orchestration for turn-based encounters.
//!
//! This crate wires the action provider abstraction, the action catalog and
//! a topic-based event bus around a single [`combat_core::Encounter`].
//! Consumers build a [`Runtime`], plug in one provider per side, and either
//! [`step`](Runtime::step) it or [`run`](Runtime::run) it to the outcome.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`providers`] exposes the provider trait and stock implementations
//! - [`events`] provides topic-based event bus for flexible event routing
pub mod config;
pub mod error;
pub mod events;
pub mod providers;
pub mod runtime;

pub use config::RuntimeConfig;
pub use error::{ProviderKind, Result, RuntimeError};
pub use events::{Event, EventBus, Topic, TurnEvent};
pub use providers::{
    ActionChoice, ActionProvider, ChannelProvider, ScriptedProvider, TacticalProvider,
};
pub use runtime::{Runtime, RuntimeBuilder, StepOutcome};
