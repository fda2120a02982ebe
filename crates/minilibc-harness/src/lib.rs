//! Conformance testing harness for minilibc.
//!
//! This crate provides:
//! - Classifier/transform runner: checks a candidate `int(int)` against the
//!   `minilibc-core` oracle over an extended code range
//! - Error-state runner: checks a candidate's `__errno_location` cell
//! - Suite orchestration: builds/loads one module per unit, never stopping
//!   at the first broken unit
//! - Report generation: markdown + JSON conformance reports
//! - Structured JSONL logging for every suite run

#![forbid(unsafe_code)]

pub mod config;
pub mod conformance;
pub mod error;
pub mod render;
pub mod report;
pub mod structured_log;
pub mod suite;
pub mod verify;

pub use config::{HarnessConfig, parse_units};
pub use conformance::{CheckResult, CodeRange, Mismatch};
pub use error::HarnessError;
pub use report::ConformanceReport;
pub use suite::{Suite, SuiteReport, UnitOutcome, UnitReport};
pub use verify::SuiteSummary;
