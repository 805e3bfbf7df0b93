use std::fmt;

/// One of the four fixed player slots.
///
/// Slot order also fixes the spawn corner: top-left, top-right,
/// bottom-right, bottom-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(u8);

impl PlayerId {
    pub const P1: Self = Self(0);
    pub const P2: Self = Self(1);
    pub const P3: Self = Self(2);
    pub const P4: Self = Self(3);

    pub const ALL: [PlayerId; 4] = [Self::P1, Self::P2, Self::P3, Self::P4];

    /// Returns the slot for `index`, or `None` outside `0..4`.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Milliseconds on the caller's game clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Self = Self(0);

    pub fn new(millis: u64) -> Self {
        Self(millis)
    }

    pub fn millis(self) -> u64 {
        self.0
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(rhs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Unique bomb identity, derived from placement time.
///
/// Two bombs placed within the same millisecond are told apart by the
/// state-wide placement sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BombId {
    pub placed_at: Timestamp,
    pub sequence: u32,
}

impl BombId {
    pub fn new(placed_at: Timestamp, sequence: u32) -> Self {
        Self {
            placed_at,
            sequence,
        }
    }
}

impl fmt::Display for BombId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bomb@{}#{}", self.placed_at.0, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_slots() {
        assert_eq!(PlayerId::from_index(2), Some(PlayerId::P3));
        assert_eq!(PlayerId::from_index(4), None);
        assert_eq!(PlayerId::P4.to_string(), "P4");
    }

    #[test]
    fn bomb_ids_order_by_time_then_sequence() {
        let early = BombId::new(Timestamp(10), 7);
        let late = BombId::new(Timestamp(11), 0);
        let same_ms = BombId::new(Timestamp(10), 8);
        assert!(early < late);
        assert!(early < same_ms);
    }
}
