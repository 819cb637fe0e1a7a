//! Action profile: the static description of a catalog action.
//!
//! A profile says who the action may target, what it costs and how it is
//! classified. It carries no behavior; that lives in the
//! [`CombatAction`](super::CombatAction) implementation.

use super::targeting::TargetConstraint;

bitflags::bitflags! {
    /// Classification tags used by AI and presentation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ActionTags: u16 {
        const ATTACK  = 1 << 0;
        const HEAL    = 1 << 1;
        const BUFF    = 1 << 2;
        const DEBUFF  = 1 << 3;
        const CLEANSE = 1 << 4;
        const GUARD   = 1 << 5;
        const ITEM    = 1 << 6;
        const GAUGE   = 1 << 7;
    }
}

/// Static description of a catalog action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionProfile {
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    /// Sanity spent by the user when the action resolves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: f32,

    /// Whether the user must name a target.
    #[cfg_attr(feature = "serde", serde(default = "default_requires_target"))]
    pub requires_target: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetConstraint,

    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: ActionTags,
}

#[cfg(feature = "serde")]
fn default_requires_target() -> bool {
    true
}

impl ActionProfile {
    /// A free, untagged action that requires a target.
    pub fn new(name: impl Into<String>, target: TargetConstraint) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cost: 0.0,
            requires_target: true,
            target,
            tags: ActionTags::empty(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_tags(mut self, tags: ActionTags) -> Self {
        self.tags = tags;
        self
    }

    /// Marks the action as usable without naming a target.
    pub fn untargeted(mut self) -> Self {
        self.requires_target = false;
        self
    }

    pub fn has_tag(&self, tag: ActionTags) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_free(&self) -> bool {
        self.cost <= 0.0
    }
}
