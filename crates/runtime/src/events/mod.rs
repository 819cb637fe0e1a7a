//! Topic-based event bus for encounter events.
//!
//! Presentation consumers subscribe to the topics they need. Events are
//! published after each step; consumers never mutate encounter state.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::TurnEvent;
