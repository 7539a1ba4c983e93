use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

/// Message priority, as carried by the `X-Priority` header
///
/// Lower values are more urgent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// `1 (Highest)`
    Highest = 1,
    /// `2 (High)`
    High = 2,
    /// `3 (Normal)`
    #[default]
    Normal = 3,
    /// `4 (Low)`
    Low = 4,
    /// `5 (Lowest)`
    Lowest = 5,
}

impl Priority {
    /// Numeric level of the priority, from 1 to 5
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Whether the message should be flagged as important
    pub fn is_important(self) -> bool {
        matches!(self, Priority::Highest | Priority::High)
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Priority::Highest),
            2 => Ok(Priority::High),
            3 => Ok(Priority::Normal),
            4 => Ok(Priority::Low),
            5 => Ok(Priority::Lowest),
            _ => Err(InvalidPriority(level)),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Highest => "Highest",
            Priority::High => "High",
            Priority::Normal => "Normal",
            Priority::Low => "Low",
            Priority::Lowest => "Lowest",
        };
        write!(f, "{} ({label})", self.level())
    }
}

/// A priority level outside of `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPriority(pub u8);

impl Display for InvalidPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid priority level {}, expected 1 to 5", self.0)
    }
}

impl StdError for InvalidPriority {}
