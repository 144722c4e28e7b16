//! Match score newtype.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Compatibility percentage between a candidate and a set of requirements.
///
/// Always within `0..=100`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct MatchScore(u8);

impl MatchScore {
    /// No overlap at all.
    pub const ZERO: Self = Self(0);
    /// Every requirement satisfied.
    pub const MAX: Self = Self(100);

    /// Create a score, clamping to 100.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > 100 { Self::MAX } else { Self(value) }
    }

    /// Build a score from a `matched / total` weight ratio.
    ///
    /// The percentage is rounded half away from zero. A zero or non-finite ratio
    /// yields [`MatchScore::ZERO`].
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_ratio(matched: f64, total: f64) -> Self {
        if total <= 0.0 {
            return Self::ZERO;
        }
        let percent = (matched / total * 100.0).round();
        if !percent.is_finite() || percent <= 0.0 {
            return Self::ZERO;
        }
        // clamped before the cast
        Self(percent.min(100.0) as u8)
    }

    /// Raw percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for MatchScore {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<MatchScore> for u8 {
    fn from(value: MatchScore) -> Self {
        value.0
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
