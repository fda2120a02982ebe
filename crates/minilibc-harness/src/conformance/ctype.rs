//! Classifier and transform conformance runner.
//!
//! Every code in the range is asserted, including codes with no character
//! rendering; only the diagnostic text changes for those.

use minilibc_core::ctype::{CaseMap, CharClass};
use minilibc_loader::CharFn;

use super::{CheckResult, CodeRange, Mismatch};
use crate::render::describe_code;

/// Check a predicate: `f(i) != 0` must equal class membership of `i`.
#[must_use]
pub fn check_class(f: &CharFn<'_>, class: CharClass, range: CodeRange) -> CheckResult {
    let mismatches = range
        .codes()
        .filter_map(|code| {
            let expected = class.matches(code);
            let actual = f.call(code);
            ((actual != 0) != expected).then(|| Mismatch {
                input: code,
                expected: i32::from(expected),
                actual,
                message: format!(
                    "{} failed for {}: expected {}, got {actual}",
                    class.symbol(),
                    describe_code(code),
                    if expected { "nonzero" } else { "0" },
                ),
            })
        })
        .collect();
    CheckResult::from_mismatches(class.symbol(), range.len(), mismatches)
}

/// Check a transform against its closed form, then its idempotence.
#[must_use]
pub fn check_case_map(f: &CharFn<'_>, map: CaseMap, range: CodeRange) -> Vec<CheckResult> {
    let mut exact = Vec::new();
    let mut idempotent = Vec::new();

    for code in range.codes() {
        let expected = map.apply(code);
        let once = f.call(code);
        if once != expected {
            exact.push(Mismatch {
                input: code,
                expected,
                actual: once,
                message: format!(
                    "{} failed for {}: expected {expected}, got {once}",
                    map.symbol(),
                    describe_code(code),
                ),
            });
        }

        let twice = f.call(once);
        if twice != once {
            idempotent.push(Mismatch {
                input: code,
                expected: once,
                actual: twice,
                message: format!(
                    "{sym}({sym}({})) = {twice}, but {sym}({code}) = {once}",
                    describe_code(code),
                    sym = map.symbol(),
                ),
            });
        }
    }

    vec![
        CheckResult::from_mismatches(map.symbol(), range.len(), exact),
        CheckResult::from_mismatches(
            format!("{}:idempotent", map.symbol()),
            range.len(),
            idempotent,
        ),
    ]
}
