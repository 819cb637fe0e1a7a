//! Damage resolution pipeline.
//!
//! Turns nominal amounts into applied effects on the roster, honoring guard
//! redirection and the derived multipliers.
//!
//! # Core Functions
//!
//! - `calculate_damage`: base × source attack multiplier (pure)
//! - `take_damage`: guard redirection, defense multiplier, clamping, death
//! - `heal_health` / `heal_sanity`: additive, clamped, multiplier-free
//! - `activate_guard` / `guard_ally`: establish a guard relation
//!
//! Absent or dead targets are a logged no-op, never a panic: an earlier hit
//! in the same resolution may already have killed the target.

mod damage;
mod guard;
mod resource;

pub use damage::{DamageReport, calculate_damage, take_damage};
pub use guard::{activate_guard, clear_guard, find_guardian, guard_ally};
pub use resource::{HealReport, ResourceKind, heal_health, heal_sanity, spend_sanity};
