//! Aggregate verdicts over a suite run.

use serde::{Deserialize, Serialize};

use crate::suite::{UnitOutcome, UnitReport};

/// Aggregate verification summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteSummary {
    /// Units attempted.
    pub total: usize,
    /// Units whose every check passed.
    pub passed: usize,
    /// Units that loaded but disagreed with the oracle.
    pub failed: usize,
    /// Units that never produced a loadable module.
    pub build_errors: usize,
    /// Units whose module or symbol could not be bound.
    pub load_errors: usize,
}

impl SuiteSummary {
    /// Build a summary from unit reports.
    #[must_use]
    pub fn from_units(units: &[UnitReport]) -> Self {
        let count = |outcome: UnitOutcome| units.iter().filter(|u| u.outcome == outcome).count();
        Self {
            total: units.len(),
            passed: count(UnitOutcome::Pass),
            failed: count(UnitOutcome::Fail),
            build_errors: count(UnitOutcome::BuildError),
            load_errors: count(UnitOutcome::LoadError),
        }
    }

    /// Returns true if at least one unit ran and every unit passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}
