//! Combat state: combatants, their resources and statuses, and the roster.
//!
//! Types here are storage with mutation contracts only. Behavior lives in
//! [`crate::status`], [`crate::combat`] and [`crate::scheduler`].

mod combatant;
mod common;
mod roster;
mod status;

pub use combatant::{ActionGauge, Combatant, CombatantTemplate, Guard, Multipliers};
pub use common::{CombatantId, ResourceMeter, Side};
pub use roster::Roster;
pub use status::{ActiveStatus, ModifiedStat, StatusSet, StatusType};
