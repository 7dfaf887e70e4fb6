//! Performer slots.
//!
//! A duoloop desk seats exactly two performers, each with their own
//! editor pane and playback state. Slots are fixed; they are never
//! created or destroyed at runtime.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One of the two fixed performer identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// Both slots, in display order.
    pub const ALL: [Slot; 2] = [Slot::A, Slot::B];

    /// The other performer's slot.
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    /// Stable index for slot-keyed arrays.
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::A => write!(f, "a"),
            Slot::B => write!(f, "b"),
        }
    }
}

impl FromStr for Slot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Slot::A),
            "b" => Ok(Slot::B),
            other => Err(Error::InvalidParameter(format!(
                "unknown slot '{other}', expected 'a' or 'b'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_roundtrip() {
        for slot in Slot::ALL {
            let parsed: Slot = slot.to_string().parse().unwrap();
            assert_eq!(parsed, slot);
        }
    }

    #[test]
    fn test_slot_parse_case_insensitive() {
        assert_eq!("A".parse::<Slot>().unwrap(), Slot::A);
        assert_eq!(" b ".parse::<Slot>().unwrap(), Slot::B);
        assert!("c".parse::<Slot>().is_err());
    }

    #[test]
    fn test_slot_other() {
        assert_eq!(Slot::A.other(), Slot::B);
        assert_eq!(Slot::B.other(), Slot::A);
    }

    #[test]
    fn test_slot_indices_distinct() {
        assert_ne!(Slot::A.index(), Slot::B.index());
    }
}
