//! Status types and the per-combatant active status set.
//!
//! A status is a named, timed modifier. Durations count the owner's own
//! completed turns, not wall-clock ticks: an entry with `remaining_turns == 2`
//! survives exactly one turn-end tick and is removed on the second.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Types of status effects.
///
/// Each type scales exactly one derived multiplier and belongs to exactly one
/// opposed pair.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusType {
    // ========================================================================
    // Buffs
    // ========================================================================
    /// Attack ×1.5.
    Strength,

    /// Damage taken ×0.5.
    Tough,

    /// Gauge fill ×1.5.
    Agile,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Attack ×0.5.
    Weakness,

    /// Damage taken ×2.0.
    Vulnerable,

    /// Gauge fill ×0.5.
    Slowed,
}

/// Derived multiplier a status scales.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifiedStat {
    Attack,
    Defense,
    ActionSpeed,
}

impl StatusType {
    /// The status this one annihilates with.
    pub const fn opposite(self) -> StatusType {
        match self {
            StatusType::Strength => StatusType::Weakness,
            StatusType::Weakness => StatusType::Strength,
            StatusType::Tough => StatusType::Vulnerable,
            StatusType::Vulnerable => StatusType::Tough,
            StatusType::Agile => StatusType::Slowed,
            StatusType::Slowed => StatusType::Agile,
        }
    }

    /// Which multiplier this status scales, and by how much.
    pub const fn modifier(self) -> (ModifiedStat, f32) {
        match self {
            StatusType::Strength => (ModifiedStat::Attack, 1.5),
            StatusType::Weakness => (ModifiedStat::Attack, 0.5),
            StatusType::Tough => (ModifiedStat::Defense, 0.5),
            StatusType::Vulnerable => (ModifiedStat::Defense, 2.0),
            StatusType::Agile => (ModifiedStat::ActionSpeed, 1.5),
            StatusType::Slowed => (ModifiedStat::ActionSpeed, 0.5),
        }
    }

    pub const fn is_negative(self) -> bool {
        matches!(
            self,
            StatusType::Weakness | StatusType::Vulnerable | StatusType::Slowed
        )
    }
}

/// A single active status with its remaining turn count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub kind: StatusType,
    pub remaining_turns: u32,
}

/// Active statuses on a combatant, at most one entry per [`StatusType`].
///
/// This is plain storage. Stacking and cancellation rules live in
/// [`StatusEngine`](crate::status::StatusEngine), which is the only writer.
/// Serialization is one-way: a set is never rebuilt from a snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusSet {
    entries: ArrayVec<ActiveStatus, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusSet {
    pub fn empty() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusType) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Remaining turns of `kind`, or `None` if absent.
    pub fn remaining_turns(&self, kind: StatusType) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.remaining_turns)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts or overwrites the entry for `kind`.
    pub(crate) fn set(&mut self, kind: StatusType, remaining_turns: u32) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.kind == kind) {
            existing.remaining_turns = remaining_turns;
            return;
        }
        // One slot per StatusType, so the set can never be full here.
        self.entries.push(ActiveStatus {
            kind,
            remaining_turns,
        });
    }

    /// Removes `kind`, returning true if it was present.
    pub(crate) fn remove(&mut self, kind: StatusType) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Decrements every entry and removes those that reach zero.
    pub(crate) fn tick(&mut self) -> ArrayVec<StatusType, { CombatConfig::MAX_STATUS_EFFECTS }> {
        let mut expired = ArrayVec::new();
        for entry in self.entries.iter_mut() {
            entry.remaining_turns = entry.remaining_turns.saturating_sub(1);
            if entry.remaining_turns == 0 {
                expired.push(entry.kind);
            }
        }
        self.entries.retain(|e| e.remaining_turns > 0);
        expired
    }
}
