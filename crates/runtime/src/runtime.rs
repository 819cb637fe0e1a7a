//! High-level runtime orchestrator.
//!
//! The runtime owns one encounter and the catalog its actions come from,
//! asks the configured providers for each turn, and republishes every
//! encounter event on the [`EventBus`].

use combat_content::{Catalog, EncounterSpec, MetaStatsTable};
use combat_core::{
    ActionError, ActionReport, CombatError, CombatantId, Encounter, EncounterOutcome, Side,
};
use tokio::sync::broadcast;

use crate::config::RuntimeConfig;
use crate::error::{ProviderKind, Result, RuntimeError};
use crate::events::{Event, EventBus, Topic, TurnEvent};
use crate::providers::ActionProvider;

/// What a single [`Runtime::step`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Time passed and nobody became ready.
    Idle { clock: f32 },
    /// `actor` took a turn. `report` is `None` when the turn was forfeited.
    Turn {
        actor: CombatantId,
        report: Option<ActionReport>,
    },
    /// The encounter is over.
    Finished(EncounterOutcome),
}

/// Main runtime that drives an encounter to its outcome.
pub struct Runtime {
    encounter: Encounter,
    catalog: Catalog,
    config: RuntimeConfig,
    bus: EventBus,

    // Action providers (injected by user)
    party_provider: Box<dyn ActionProvider>,
    enemy_provider: Box<dyn ActionProvider>,

    steps: u32,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// A handle to the event bus; clones share the same channels.
    pub fn event_bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Steps taken so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Advance time to the next ready combatant and play its turn.
    ///
    /// A choice naming an unknown action, or one the encounter rejects,
    /// forfeits the turn. Provider failures other than recoverable ones are
    /// returned as errors.
    pub async fn step(&mut self) -> Result<StepOutcome> {
        if let Some(outcome) = self.encounter.outcome() {
            return Ok(StepOutcome::Finished(outcome.clone()));
        }
        if self.steps >= self.config.max_steps {
            return Err(RuntimeError::StepLimit {
                max_steps: self.config.max_steps,
            });
        }
        self.steps += 1;

        let ready = if self.config.skip_idle_time {
            self.encounter.advance_to_next_turn()
        } else {
            self.encounter.advance(self.config.timestep)
        };
        let Some(actor) = ready else {
            let roster = self.encounter.roster();
            if self
                .encounter
                .scheduler()
                .time_until_next_ready(roster)
                .is_none()
            {
                return Err(RuntimeError::Stalled);
            }
            let clock = self.encounter.scheduler().clock();
            self.bus.publish(Event::Turn(TurnEvent::Idle { clock }));
            return Ok(StepOutcome::Idle { clock });
        };

        self.encounter
            .begin_turn(actor)
            .map_err(RuntimeError::Turn)?;
        self.publish_pending();

        let report = self.play_turn(actor).await?;
        self.encounter.end_turn();
        self.publish_pending();

        match self.encounter.outcome() {
            Some(outcome) => Ok(StepOutcome::Finished(outcome.clone())),
            None => Ok(StepOutcome::Turn { actor, report }),
        }
    }

    /// Run steps until the encounter ends.
    pub async fn run(&mut self) -> Result<EncounterOutcome> {
        loop {
            if let StepOutcome::Finished(outcome) = self.step().await? {
                tracing::info!(%outcome, steps = self.steps, "encounter finished");
                return Ok(outcome);
            }
        }
    }

    /// Stops the encounter from outside and publishes the outcome.
    pub fn abort(&mut self, reason: impl Into<String>) {
        self.encounter.abort(reason);
        self.publish_pending();
    }

    async fn play_turn(&mut self, actor: CombatantId) -> Result<Option<ActionReport>> {
        let side = self
            .encounter
            .combatant(actor)
            .map(|combatant| combatant.side())
            .ok_or(RuntimeError::Turn(ActionError::UnknownCombatant { id: actor }))?;
        let turn = self.encounter.turn();
        let provider = match side {
            Side::Ally => &self.party_provider,
            Side::Enemy => &self.enemy_provider,
        };

        self.bus.publish(Event::Turn(TurnEvent::Prompted {
            actor,
            turn,
            clock: self.encounter.scheduler().clock(),
        }));

        let choice = match provider
            .choose_action(actor, &self.encounter, &self.catalog)
            .await
        {
            Ok(choice) => choice,
            Err(error) if error.severity().is_recoverable() => {
                self.forfeit(actor, &error);
                return Ok(None);
            }
            Err(error) => return Err(error),
        };

        let Some(entry) = self.catalog.get(&choice.action) else {
            let error = RuntimeError::UnknownAction {
                name: choice.action,
            };
            self.forfeit(actor, &error);
            return Ok(None);
        };

        match self.encounter.perform(entry, actor, choice.target) {
            Ok(report) => Ok(Some(report)),
            Err(error) => {
                self.forfeit(actor, &error);
                Ok(None)
            }
        }
    }

    fn forfeit(&self, actor: CombatantId, reason: &dyn CombatError) {
        tracing::warn!(
            %actor,
            %reason,
            code = reason.error_code(),
            severity = reason.severity().as_str(),
            "turn forfeited"
        );
        self.bus.publish(Event::Turn(TurnEvent::Forfeited {
            actor,
            reason: reason.to_string(),
        }));
    }

    fn publish_pending(&mut self) {
        self.bus.publish_all(self.encounter.drain_events());
    }
}

/// Builder for [`Runtime`] with flexible configuration.
///
/// Either hand over a ready [`Encounter`] or an [`EncounterSpec`] that is
/// built with the configured combat tuning and optional meta-stats.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    encounter: Option<Encounter>,
    spec: Option<EncounterSpec>,
    meta: Option<MetaStatsTable>,
    catalog: Option<Catalog>,
    party_provider: Option<Box<dyn ActionProvider>>,
    enemy_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            encounter: None,
            spec: None,
            meta: None,
            catalog: None,
            party_provider: None,
            enemy_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an encounter that is already set up. Takes precedence over
    /// [`spec`](Self::spec).
    pub fn encounter(mut self, encounter: Encounter) -> Self {
        self.encounter = Some(encounter);
        self
    }

    /// Build the encounter from templates at [`build`](Self::build) time.
    pub fn spec(mut self, spec: EncounterSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Per-class base rates used when building from a spec.
    pub fn meta_stats(mut self, meta: MetaStatsTable) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn party_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.party_provider = Some(Box::new(provider));
        self
    }

    pub fn enemy_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.enemy_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let party_provider = self.party_provider.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Party,
        })?;
        let enemy_provider = self.enemy_provider.ok_or(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Enemy,
        })?;

        let encounter = match (self.encounter, self.spec) {
            (Some(encounter), _) => encounter,
            (None, Some(spec)) => {
                let builder = Encounter::builder().config(self.config.combat.clone());
                match &self.meta {
                    Some(meta) => spec.into_builder(builder.meta_stats(meta)).build()?,
                    None => spec.into_builder(builder).build()?,
                }
            }
            (None, None) => return Err(RuntimeError::MissingEncounter),
        };

        let bus = EventBus::with_capacity(self.config.event_buffer_size);
        tracing::debug!(
            combatants = encounter.roster().len(),
            actions = catalog.len(),
            "runtime ready"
        );

        Ok(Runtime {
            encounter,
            catalog,
            config: self.config,
            bus,
            party_provider,
            enemy_provider,
            steps: 0,
        })
    }
}
