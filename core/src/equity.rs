//! Equity bookkeeping for completed tasks.
//!
//! Each role carries an equity cap. Signing off a task draws its share from that cap,
//! and the sum of all draws may never exceed it.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Equity amount in basis points (100 bps = 1 %).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u16")]
pub struct EquityBps(u16);

impl EquityBps {
    /// No equity.
    pub const ZERO: Self = Self(0);
    /// The whole company.
    pub const FULL: Self = Self(10_000);

    /// Create an amount, clamping to 100 %.
    #[must_use]
    pub const fn new(bps: u16) -> Self {
        if bps > Self::FULL.0 { Self::FULL } else { Self(bps) }
    }

    /// Convert a percentage such as `2.5` into basis points.
    ///
    /// # Errors
    ///
    /// Returns [`EquityError::InvalidPercent`] for negative, non-finite or over-100 values.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_percent(percent: f64) -> Result<Self, EquityError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(EquityError::InvalidPercent(percent));
        }
        // range checked above
        Ok(Self((percent * 100.0).round() as u16))
    }

    /// Raw basis points.
    #[must_use]
    pub const fn bps(self) -> u16 {
        self.0
    }

    /// Value as a percentage.
    #[must_use]
    pub fn percent(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Add two amounts, saturating at 100 %.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(self.0.saturating_add(other.0))
    }

    /// Add two amounts, returning `None` past 100 %.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) if sum <= Self::FULL.0 => Some(Self(sum)),
            _ => None,
        }
    }

    /// Subtract, flooring at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl TryFrom<u32> for EquityBps {
    type Error = EquityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .filter(|bps| *bps <= Self::FULL.0)
            .map(Self)
            .ok_or(EquityError::OutOfRange(value))
    }
}

impl From<EquityBps> for u16 {
    fn from(value: EquityBps) -> Self {
        value.0
    }
}

impl fmt::Display for EquityBps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// Errors raised by equity bookkeeping.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EquityError {
    /// The allocation would push the total past the cap.
    #[error("allocating {requested} exceeds the remaining {remaining}")]
    CapExceeded {
        /// Amount that was requested.
        requested: EquityBps,
        /// Amount still available under the cap.
        remaining: EquityBps,
    },

    /// The task already holds an allocation.
    #[error("task '{task_id}' already has an equity allocation")]
    AlreadyAllocated {
        /// Task that was allocated twice.
        task_id: String,
    },

    /// A percentage outside `0..=100`.
    #[error("invalid equity percentage: {0}")]
    InvalidPercent(f64),

    /// A basis-point value above 10 000.
    #[error("equity of {0} bps is out of range")]
    OutOfRange(u32),
}

/// One task's draw against the cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    /// Task that earned the equity.
    pub task_id: String,
    /// Amount granted.
    pub amount: EquityBps,
}

/// Running total of equity granted for a single role.
///
/// Deserializing replays every stored allocation through [`EquityLedger::allocate`],
/// so a stored ledger over its cap or with a repeated task is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredLedger")]
pub struct EquityLedger {
    cap: EquityBps,
    allocations: Vec<Allocation>,
}

impl EquityLedger {
    /// Create an empty ledger with the given cap.
    #[must_use]
    pub const fn new(cap: EquityBps) -> Self {
        Self {
            cap,
            allocations: Vec::new(),
        }
    }

    /// Configured cap.
    #[must_use]
    pub const fn cap(&self) -> EquityBps {
        self.cap
    }

    /// Sum of all allocations.
    #[must_use]
    pub fn allocated(&self) -> EquityBps {
        self.allocations
            .iter()
            .fold(EquityBps::ZERO, |acc, a| acc.saturating_add(a.amount))
    }

    /// What is left under the cap.
    #[must_use]
    pub fn remaining(&self) -> EquityBps {
        self.cap.saturating_sub(self.allocated())
    }

    /// Whether `amount` still fits under the cap.
    #[must_use]
    pub fn can_allocate(&self, amount: EquityBps) -> bool {
        amount <= self.remaining()
    }

    /// Record equity earned by a completed task.
    ///
    /// # Errors
    ///
    /// Returns [`EquityError::AlreadyAllocated`] if the task is already recorded, or
    /// [`EquityError::CapExceeded`] if the amount does not fit.
    pub fn allocate(
        &mut self,
        task_id: impl Into<String>,
        amount: EquityBps,
    ) -> Result<(), EquityError> {
        let task_id = task_id.into();
        if self.allocations.iter().any(|a| a.task_id == task_id) {
            return Err(EquityError::AlreadyAllocated { task_id });
        }

        let remaining = self.remaining();
        if amount > remaining {
            tracing::debug!(%task_id, %amount, %remaining, "equity allocation rejected");
            return Err(EquityError::CapExceeded {
                requested: amount,
                remaining,
            });
        }

        self.allocations.push(Allocation { task_id, amount });
        Ok(())
    }

    /// Undo a task's allocation, returning it if present.
    pub fn release(&mut self, task_id: &str) -> Option<Allocation> {
        let idx = self.allocations.iter().position(|a| a.task_id == task_id)?;
        Some(self.allocations.remove(idx))
    }

    /// Recorded allocations in insertion order.
    #[must_use]
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }
}

#[derive(Deserialize)]
struct StoredLedger {
    cap: EquityBps,
    #[serde(default)]
    allocations: Vec<Allocation>,
}

impl TryFrom<StoredLedger> for EquityLedger {
    type Error = EquityError;

    fn try_from(stored: StoredLedger) -> Result<Self, Self::Error> {
        let mut ledger = Self::new(stored.cap);
        for Allocation { task_id, amount } in stored.allocations {
            ledger.allocate(task_id, amount)?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_conversion() {
        assert_eq!(EquityBps::from_percent(2.5).unwrap(), EquityBps::new(250));
        assert_eq!(EquityBps::new(250).percent(), 2.5);
        assert!(matches!(
            EquityBps::from_percent(-1.0),
            Err(EquityError::InvalidPercent(_))
        ));
        assert!(EquityBps::from_percent(f64::NAN).is_err());
        assert!(EquityBps::from_percent(100.5).is_err());
    }

    #[test]
    fn display_as_percent() {
        assert_eq!(EquityBps::new(1_205).to_string(), "12.05%");
    }

    #[test]
    fn arithmetic_respects_bounds() {
        assert_eq!(EquityBps::new(20_000), EquityBps::FULL);
        assert_eq!(
            EquityBps::new(9_000).saturating_add(EquityBps::new(2_000)),
            EquityBps::FULL
        );
        assert_eq!(EquityBps::new(9_000).checked_add(EquityBps::new(2_000)), None);
        assert_eq!(
            EquityBps::new(100).saturating_sub(EquityBps::new(300)),
            EquityBps::ZERO
        );
    }

    #[test]
    fn allocate_until_cap() {
        let mut ledger = EquityLedger::new(EquityBps::new(500));
        ledger.allocate("a", EquityBps::new(200)).unwrap();
        ledger.allocate("b", EquityBps::new(300)).unwrap();

        assert_eq!(ledger.remaining(), EquityBps::ZERO);
        assert!(!ledger.can_allocate(EquityBps::new(1)));

        let err = ledger.allocate("c", EquityBps::new(1)).unwrap_err();
        assert_eq!(
            err,
            EquityError::CapExceeded {
                requested: EquityBps::new(1),
                remaining: EquityBps::ZERO,
            }
        );
    }

    #[test]
    fn duplicate_task_rejected() {
        let mut ledger = EquityLedger::new(EquityBps::FULL);
        ledger.allocate("a", EquityBps::new(10)).unwrap();
        assert!(matches!(
            ledger.allocate("a", EquityBps::new(10)),
            Err(EquityError::AlreadyAllocated { .. })
        ));
    }

    #[test]
    fn release_restores_remaining() {
        let mut ledger = EquityLedger::new(EquityBps::new(300));
        ledger.allocate("a", EquityBps::new(300)).unwrap();

        let released = ledger.release("a").unwrap();
        assert_eq!(released.amount, EquityBps::new(300));
        assert_eq!(ledger.remaining(), EquityBps::new(300));
        assert!(ledger.release("a").is_none());
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<EquityBps>("10001").is_err());
        assert_eq!(
            serde_json::from_str::<EquityBps>("75").unwrap(),
            EquityBps::new(75)
        );
    }

    #[test]
    fn stored_ledger_is_replayed() {
        let ledger: EquityLedger = serde_json::from_str(
            r#"{"cap":500,"allocations":[{"taskId":"a","amount":200},{"taskId":"b","amount":300}]}"#,
        )
        .unwrap();
        assert_eq!(ledger.allocated(), EquityBps::new(500));
        assert_eq!(
            serde_json::from_str::<EquityLedger>(&serde_json::to_string(&ledger).unwrap()).unwrap(),
            ledger
        );
    }

    #[test]
    fn stored_ledger_over_cap_rejected() {
        let over = r#"{"cap":100,"allocations":[{"taskId":"a","amount":500}]}"#;
        assert!(serde_json::from_str::<EquityLedger>(over).is_err());

        let repeated = r#"{"cap":1000,"allocations":[{"taskId":"a","amount":50},{"taskId":"a","amount":50}]}"#;
        let err = serde_json::from_str::<EquityLedger>(repeated).unwrap_err();
        assert!(err.to_string().contains("already has an equity allocation"));
    }
}
