use std::fmt;

/// Identifier of a combatant within one encounter.
///
/// Ids are assigned in roster order (party first, then enemies) and double as
/// the scheduling priority: a lower id wins a tie for the next turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the encounter a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Side::Ally => Side::Enemy,
            Side::Enemy => Side::Ally,
        }
    }
}

/// Bounded resource pool (health, sanity).
///
/// `current` always stays within `0..=maximum`; every mutation clamps and
/// reports how much actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: f32,
    maximum: f32,
}

impl ResourceMeter {
    /// Creates a meter; `maximum` is floored at 0 and `current` clamped into range.
    pub fn new(current: f32, maximum: f32) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            current: current.clamp(0.0, maximum),
            maximum,
        }
    }

    pub fn full(maximum: f32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }

    /// Adds up to `amount`, stopping at the maximum. Returns the amount gained.
    pub fn restore(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.maximum);
        self.current - before
    }

    /// Removes up to `amount`, stopping at zero. Returns the amount lost.
    pub fn deplete(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);
        before - self.current
    }
}
