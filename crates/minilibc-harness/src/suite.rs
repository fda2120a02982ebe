//! Suite orchestration: one module per unit, every unit checked.
//!
//! A unit that fails to build or load is recorded and the run moves on; only
//! log I/O errors abort a run.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use minilibc_loader::{CandidateModule, CandidateProvider, LoadError, Unit};

use crate::conformance::{CheckResult, CodeRange, ctype, errno};
use crate::error::HarnessError;
pub use crate::structured_log::Outcome as UnitOutcome;
use crate::structured_log::{
    EVENT_CHECK_RESULT, EVENT_SUITE_END, EVENT_SUITE_START, EVENT_UNIT_END, EVENT_UNIT_START,
    LogEmitter, LogLevel,
};
use crate::verify::SuiteSummary;

/// Result of one unit: how far it got and what its checks said.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitReport {
    pub unit: String,
    pub symbol: String,
    pub outcome: UnitOutcome,
    /// Build or load failure, when the unit never reached its checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checks: Vec<CheckResult>,
    pub duration_ms: u64,
}

impl UnitReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == UnitOutcome::Pass
    }

    fn from_checks(unit: Unit, checks: Vec<CheckResult>, duration_ms: u64) -> Self {
        let outcome = if checks.iter().all(|c| c.passed) {
            UnitOutcome::Pass
        } else {
            UnitOutcome::Fail
        };
        Self {
            unit: unit.name().to_string(),
            symbol: unit.symbol().to_string(),
            outcome,
            error: None,
            checks,
            duration_ms,
        }
    }

    fn from_error(unit: Unit, err: &LoadError, duration_ms: u64) -> Self {
        let outcome = if err.is_build_failure() {
            UnitOutcome::BuildError
        } else {
            UnitOutcome::LoadError
        };
        Self {
            unit: unit.name().to_string(),
            symbol: unit.symbol().to_string(),
            outcome,
            error: Some(err.to_string()),
            checks: Vec::new(),
            duration_ms,
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub provider: String,
    pub range: CodeRange,
    pub units: Vec<UnitReport>,
}

impl SuiteReport {
    #[must_use]
    pub fn summary(&self) -> SuiteSummary {
        SuiteSummary::from_units(&self.units)
    }

    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&UnitReport> {
        self.units.iter().find(|u| u.unit == name)
    }
}

pub struct Suite<'p> {
    provider: &'p dyn CandidateProvider,
    range: CodeRange,
    units: Vec<Unit>,
}

impl<'p> Suite<'p> {
    /// A suite over every unit.
    #[must_use]
    pub fn new(provider: &'p dyn CandidateProvider, range: CodeRange) -> Self {
        Self {
            provider,
            range,
            units: Unit::all(),
        }
    }

    /// Restrict the run to `units`, in the given order.
    #[must_use]
    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self
    }

    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn run(&self, log: &mut LogEmitter) -> Result<SuiteReport, HarnessError> {
        let provider = self.provider.describe();
        let started = Instant::now();
        let entry = log
            .entry(LogLevel::Info, EVENT_SUITE_START)
            .with_details(serde_json::json!({
                "provider": provider,
                "range": self.range.to_string(),
                "units": self.units.len(),
            }));
        log.emit_entry(entry)?;

        let mut units = Vec::with_capacity(self.units.len());
        for &unit in &self.units {
            units.push(self.run_unit(unit, log)?);
        }

        let report = SuiteReport {
            provider,
            range: self.range,
            units,
        };
        let summary = report.summary();
        let level = if summary.all_passed() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        let entry = log
            .entry(level, EVENT_SUITE_END)
            .with_duration_ms(elapsed_ms(started))
            .with_details(serde_json::to_value(&summary)?);
        log.emit_entry(entry)?;
        log.flush()?;
        Ok(report)
    }

    fn run_unit(&self, unit: Unit, log: &mut LogEmitter) -> Result<UnitReport, HarnessError> {
        let entry = log
            .entry(LogLevel::Info, EVENT_UNIT_START)
            .with_unit(unit.name(), unit.symbol());
        log.emit_entry(entry)?;

        let started = Instant::now();
        let mut object = None;
        let checks = self.provider.provide(unit).and_then(|module| {
            object = Some(module.path().display().to_string());
            self.check_module(unit, &module)
        });
        let report = match checks {
            Ok(checks) => UnitReport::from_checks(unit, checks, elapsed_ms(started)),
            Err(err) => UnitReport::from_error(unit, &err, elapsed_ms(started)),
        };

        for check in &report.checks {
            let mut entry = log
                .entry(
                    if check.passed { LogLevel::Info } else { LogLevel::Error },
                    EVENT_CHECK_RESULT,
                )
                .with_unit(unit.name(), unit.symbol())
                .with_check(&check.name)
                .with_outcome(if check.passed {
                    UnitOutcome::Pass
                } else {
                    UnitOutcome::Fail
                });
            if let Some(first) = check.mismatches.first() {
                entry = entry.with_mismatch(first.input, first.expected, first.actual);
            }
            if !check.passed {
                entry = entry.with_details(serde_json::json!({
                    "checked": check.checked,
                    "mismatches": check.mismatches.len(),
                    "first_failure": check.failure_messages().next(),
                }));
            }
            log.emit_entry(entry)?;
        }

        let mut entry = log
            .entry(
                if report.passed() { LogLevel::Info } else { LogLevel::Error },
                EVENT_UNIT_END,
            )
            .with_unit(unit.name(), unit.symbol())
            .with_outcome(report.outcome)
            .with_duration_ms(report.duration_ms);
        if let Some(path) = object {
            entry = entry.with_artifacts(vec![path]);
        }
        if let Some(error) = &report.error {
            entry = entry.with_details(serde_json::json!({ "error": error }));
        }
        log.emit_entry(entry)?;
        Ok(report)
    }

    fn check_module(
        &self,
        unit: Unit,
        module: &CandidateModule,
    ) -> Result<Vec<CheckResult>, LoadError> {
        Ok(match unit {
            Unit::Class(class) => {
                let f = module.char_fn(unit.symbol())?;
                vec![ctype::check_class(&f, class, self.range)]
            }
            Unit::Case(map) => {
                let f = module.char_fn(unit.symbol())?;
                ctype::check_case_map(&f, map, self.range)
            }
            Unit::Errno => errno::check_errno(&module.errno_cell()?),
        })
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
