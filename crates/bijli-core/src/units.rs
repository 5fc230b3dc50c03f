//! Duration quantity carried by the `Diff in mins` column.
//!
//! Outage durations arrive as free text in the export (`"30"`, `"30.0"`,
//! `"12.5"`). They are parsed once at ingestion into [`Minutes`] so that two
//! spellings of the same duration group together, and rendered back with the
//! shortest text that round-trips to the same `f64`.
//!
//! ```
//! use bijli_core::units::Minutes;
//!
//! let a: Minutes = "30".parse().unwrap();
//! let b: Minutes = "30.0".parse().unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_string(), "30");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outage duration in minutes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Minutes(pub f64);

impl Minutes {
    /// Create a new value
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw numeric value
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Bit pattern used as a hashable grouping key. `-0.0` is folded onto `0.0`.
    #[inline]
    pub fn key_bits(self) -> u64 {
        if self.0 == 0.0 {
            0.0f64.to_bits()
        } else {
            self.0.to_bits()
        }
    }
}

/// Why a duration cell could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinutesParseError {
    NotANumber,
    Negative,
    NotFinite,
}

impl fmt::Display for MinutesParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinutesParseError::NotANumber => write!(f, "not a number"),
            MinutesParseError::Negative => write!(f, "duration must not be negative"),
            MinutesParseError::NotFinite => write!(f, "duration must be finite"),
        }
    }
}

impl std::error::Error for MinutesParseError {}

impl FromStr for Minutes {
    type Err = MinutesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| MinutesParseError::NotANumber)?;
        if !value.is_finite() {
            return Err(MinutesParseError::NotFinite);
        }
        if value < 0.0 {
            return Err(MinutesParseError::Negative);
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Minutes {
    // Shortest round-trip rendering; integral values print without a fraction.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
