//! Headless encounter simulator.
//!
//! Loads a catalog, an encounter roster and optional tuning, lets the
//! tactical provider play both sides, and prints every event.
//!
//! ```bash
//! RUST_LOG=runtime=debug cargo run -p runtime --bin encounter-sim -- --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_content::{CatalogLoader, ConfigLoader, EncounterLoader, MetaStatsLoader};
use runtime::{Event, Runtime, RuntimeConfig, TacticalProvider, Topic};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "encounter-sim", about = "Run one encounter to its outcome")]
struct Args {
    /// Action catalog (RON). Defaults to the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Encounter roster (RON). Defaults to the sample crypt encounter.
    #[arg(long)]
    encounter: Option<PathBuf>,

    /// Per-class meta-stats (RON). Defaults to the built-in table.
    #[arg(long)]
    meta: Option<PathBuf>,

    /// Combat tuning (TOML). Defaults to the built-in tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Advance time in fixed steps instead of jumping to the next turn.
    #[arg(long)]
    timestep: Option<f32>,

    /// Give up after this many steps.
    #[arg(long, default_value_t = 10_000)]
    max_steps: u32,

    /// Print events as JSON lines instead of debug text.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging();

    let catalog = match &args.catalog {
        Some(path) => CatalogLoader::load(path)?,
        None => CatalogLoader::builtin()?,
    };
    let spec = match &args.encounter {
        Some(path) => EncounterLoader::load(path)?,
        None => EncounterLoader::crypt()?,
    };
    let meta = match &args.meta {
        Some(path) => MetaStatsLoader::load(path)?,
        None => MetaStatsLoader::builtin()?,
    };
    let combat = match &args.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::builtin()?,
    };

    let mut config = RuntimeConfig {
        combat,
        ..RuntimeConfig::default()
    }
    .with_max_steps(args.max_steps);
    if let Some(timestep) = args.timestep {
        config = config.with_timestep(timestep);
    }

    let mut runtime = Runtime::builder()
        .config(config)
        .catalog(catalog)
        .spec(spec)
        .meta_stats(meta)
        .party_provider(TacticalProvider::new())
        .enemy_provider(TacticalProvider::new())
        .build()
        .context("failed to set up encounter")?;

    for combatant in runtime.encounter().roster().iter() {
        tracing::info!(
            id = %combatant.id(),
            name = combatant.name(),
            side = %combatant.side(),
            rate = combatant.gauge().base_rate(),
            "combatant"
        );
    }

    let printer = tokio::spawn(print_events(
        runtime.subscribe(Topic::Combat),
        runtime.subscribe(Topic::Turn),
        args.json,
    ));

    let result = runtime.run().await;
    drop(runtime);
    printer.await?;

    let outcome = result?;
    println!("outcome: {outcome}");
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn print_events(
    mut combat: broadcast::Receiver<Event>,
    mut turn: broadcast::Receiver<Event>,
    json: bool,
) {
    let (mut combat_open, mut turn_open) = (true, true);
    while combat_open || turn_open {
        let received = tokio::select! {
            event = combat.recv(), if combat_open => (Topic::Combat, event),
            event = turn.recv(), if turn_open => (Topic::Turn, event),
        };
        match received {
            (_, Ok(event)) => print_event(&event, json),
            (topic, Err(RecvError::Lagged(skipped))) => {
                tracing::warn!(?topic, skipped, "event printer fell behind");
            }
            (Topic::Combat, Err(RecvError::Closed)) => combat_open = false,
            (Topic::Turn, Err(RecvError::Closed)) => turn_open = false,
        }
    }
}

fn print_event(event: &Event, json: bool) {
    if !json {
        println!("{event:?}");
        return;
    }
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(error) => tracing::warn!(%error, "failed to encode event"),
    }
}
