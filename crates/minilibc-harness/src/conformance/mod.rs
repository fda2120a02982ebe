//! Conformance runners and their shared result types.

pub mod ctype;
pub mod errno;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Half-open range of integer codes fed to every ctype candidate.
///
/// Always covers [`CodeRange::MINIMUM`]; deserialization goes through
/// [`CodeRange::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCodeRange")]
pub struct CodeRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
struct RawCodeRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawCodeRange> for CodeRange {
    type Error = HarnessError;

    fn try_from(raw: RawCodeRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl CodeRange {
    /// Smallest range a run may use: ten negative codes through 299.
    pub const MINIMUM: CodeRange = CodeRange {
        start: -10,
        end: 300,
    };

    /// Build a range, rejecting anything that does not cover [`Self::MINIMUM`].
    pub fn new(start: i32, end: i32) -> Result<Self, HarnessError> {
        if start > Self::MINIMUM.start || end < Self::MINIMUM.end {
            return Err(HarnessError::Config(format!(
                "code range {start}..{end} must cover at least {}",
                Self::MINIMUM
            )));
        }
        Ok(Self { start, end })
    }

    /// First code, inclusive.
    #[must_use]
    pub const fn start(self) -> i32 {
        self.start
    }

    /// One past the last code.
    #[must_use]
    pub const fn end(self) -> i32 {
        self.end
    }

    pub fn codes(self) -> impl Iterator<Item = i32> {
        self.start..self.end
    }

    #[must_use]
    pub fn len(self) -> usize {
        usize::try_from(i64::from(self.end) - i64::from(self.start)).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl Default for CodeRange {
    fn default() -> Self {
        Self::MINIMUM
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl FromStr for CodeRange {
    type Err = HarnessError;

    /// Parse `START..END` (end exclusive), e.g. `-10..300`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .trim()
            .split_once("..")
            .ok_or_else(|| HarnessError::Config(format!("expected START..END, got '{s}'")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|e| HarnessError::Config(format!("bad range bound '{part}': {e}")))
        };
        Self::new(parse(start)?, parse(end)?)
    }
}

/// One input on which the candidate disagreed with the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub input: i32,
    pub expected: i32,
    pub actual: i32,
    pub message: String,
}

/// Outcome of one named check against one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check identifier, e.g. `isdigit`, `toupper:idempotent`, `errno:initial_value`.
    pub name: String,
    pub passed: bool,
    /// Number of individual assertions evaluated.
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
    /// Failure that is not a value mismatch (e.g. a moved or null location).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    #[must_use]
    pub fn from_mismatches(
        name: impl Into<String>,
        checked: usize,
        mismatches: Vec<Mismatch>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: mismatches.is_empty(),
            checked,
            mismatches,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(name: impl Into<String>, checked: usize, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            checked,
            mismatches: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Every failure message, mismatches first.
    pub fn failure_messages(&self) -> impl Iterator<Item = &str> {
        self.mismatches
            .iter()
            .map(|m| m.message.as_str())
            .chain(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_is_minimum() {
        let range = CodeRange::default();
        assert_eq!(range, CodeRange::MINIMUM);
        assert_eq!(range.len(), 310);
        assert_eq!(range.codes().next(), Some(-10));
        assert_eq!(range.codes().last(), Some(299));
    }

    #[test]
    fn parse_accepts_wider_ranges() {
        let range: CodeRange = "-128..512".parse().unwrap();
        assert_eq!((range.start(), range.end()), (-128, 512));
        let range: CodeRange = " -10 .. 300 ".parse().unwrap();
        assert_eq!(range, CodeRange::MINIMUM);
    }

    #[test]
    fn parse_rejects_narrow_or_malformed_ranges() {
        assert!("0..256".parse::<CodeRange>().is_err());
        assert!("-10..299".parse::<CodeRange>().is_err());
        assert!("-10,300".parse::<CodeRange>().is_err());
        assert!("a..300".parse::<CodeRange>().is_err());
    }

    #[test]
    fn serde_keeps_the_minimum() {
        let json = serde_json::to_string(&CodeRange::new(-128, 512).unwrap()).unwrap();
        assert_eq!(json, r#"{"start":-128,"end":512}"#);
        let back: CodeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CodeRange::new(-128, 512).unwrap());

        let narrow = serde_json::from_str::<CodeRange>(r#"{"start":0,"end":256}"#);
        let err = narrow.unwrap_err().to_string();
        assert!(err.contains("must cover at least -10..300"), "{err}");
    }

    #[test]
    fn check_result_pass_fail() {
        let ok = CheckResult::from_mismatches("isdigit", 310, Vec::new());
        assert!(ok.passed);
        assert_eq!(ok.failure_messages().count(), 0);

        let bad = CheckResult::failed("errno:location_stability", 2, "moved");
        assert!(!bad.passed);
        assert_eq!(bad.failure_messages().collect::<Vec<_>>(), vec!["moved"]);
    }
}
