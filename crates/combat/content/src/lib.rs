//! Data-driven combat content and loaders.
//!
//! This crate houses the action catalog and the files it is loaded from:
//! - Skills and items as tagged effect lists ([`Catalog`], [`CatalogEntry`])
//! - Per-class meta-stats ([`MetaStatsTable`])
//! - Combat tuning (TOML) and sample encounter rosters (RON)
//!
//! Content is consumed by the runtime at setup and never appears in
//! encounter state. [`CatalogEntry`] implements
//! [`combat_core::CombatAction`] by interpreting its effect list.

pub mod catalog;
pub mod effect;
pub mod meta;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use effect::{Effect, EffectKind, Recipient};
pub use meta::{ClassStats, MetaStatsTable};

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, EncounterLoader, EncounterSpec, LoadResult, MetaStatsLoader,
};
