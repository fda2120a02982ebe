//! Report generation for conformance results.

use serde::{Deserialize, Serialize};

use crate::structured_log::now_utc;
use crate::suite::{SuiteReport, UnitOutcome, UnitReport};
use crate::verify::SuiteSummary;

/// Failure lines shown per check in markdown; the JSON report keeps all.
pub const MAX_FAILURES_PER_CHECK: usize = 10;

/// A conformance report over one suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Where candidates came from (`sources:<root>` or `library:<path>`).
    pub provider: String,
    /// Code range the ctype units were checked over.
    pub range: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    pub summary: SuiteSummary,
    pub units: Vec<UnitReport>,
}

impl ConformanceReport {
    #[must_use]
    pub fn from_suite(title: impl Into<String>, suite: SuiteReport) -> Self {
        Self {
            title: title.into(),
            summary: suite.summary(),
            provider: suite.provider,
            range: suite.range.to_string(),
            timestamp: now_utc(),
            units: suite.units,
        }
    }

    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Provider: {}\n", self.provider));
        out.push_str(&format!("- Range: {}\n", self.range));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n", self.summary.failed));
        out.push_str(&format!("- Build errors: {}\n", self.summary.build_errors));
        out.push_str(&format!("- Load errors: {}\n\n", self.summary.load_errors));

        out.push_str("| Unit | Symbol | Status | Checks | ms |\n");
        out.push_str("|------|--------|--------|--------|----|\n");
        for u in &self.units {
            let passed = u.checks.iter().filter(|c| c.passed).count();
            out.push_str(&format!(
                "| {} | `{}` | {} | {}/{} | {} |\n",
                u.unit,
                u.symbol,
                status_label(u.outcome),
                passed,
                u.checks.len(),
                u.duration_ms
            ));
        }

        let failing: Vec<_> = self.units.iter().filter(|u| !u.passed()).collect();
        if !failing.is_empty() {
            out.push_str("\n## Failures\n");
            for u in failing {
                out.push_str(&format!("\n### {} ({})\n\n", u.unit, status_label(u.outcome)));
                if let Some(error) = &u.error {
                    out.push_str("```\n");
                    out.push_str(error.trim_end());
                    out.push_str("\n```\n");
                }
                for check in u.checks.iter().filter(|c| !c.passed) {
                    let messages: Vec<_> = check.failure_messages().collect();
                    out.push_str(&format!("- `{}`: {} failure(s)\n", check.name, messages.len()));
                    for message in messages.iter().take(MAX_FAILURES_PER_CHECK) {
                        out.push_str(&format!("  - {message}\n"));
                    }
                    if messages.len() > MAX_FAILURES_PER_CHECK {
                        out.push_str(&format!(
                            "  - ... {} more\n",
                            messages.len() - MAX_FAILURES_PER_CHECK
                        ));
                    }
                }
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

fn status_label(outcome: UnitOutcome) -> &'static str {
    match outcome {
        UnitOutcome::Pass => "PASS",
        UnitOutcome::Fail => "FAIL",
        UnitOutcome::BuildError => "BUILD ERROR",
        UnitOutcome::LoadError => "LOAD ERROR",
    }
}
