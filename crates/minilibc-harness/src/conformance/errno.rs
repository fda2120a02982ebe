//! Error-state conformance runner.
//!
//! Four independent checks, run in a fixed order so the initial-value check
//! sees the cell exactly as the freshly loaded module left it.

use std::hint::black_box;

use minilibc_core::errno;
use minilibc_loader::ErrnoCell;

use super::{CheckResult, Mismatch};

pub const CHECK_INITIAL_VALUE: &str = "errno:initial_value";
pub const CHECK_READ_WRITE: &str = "errno:read_write";
pub const CHECK_LOCATION_STABILITY: &str = "errno:location_stability";
pub const CHECK_INDEPENDENCE: &str = "errno:independence";

/// Values written and read back, in order. Ends at zero so the cell is left
/// clean for later checks.
pub const ROUND_TRIP_VALUES: [i32; 7] = [123, 456, -1, errno::ERANGE, i32::MAX, i32::MIN, 0];

/// Run every errno check against a freshly loaded cell.
#[must_use]
pub fn check_errno(cell: &ErrnoCell<'_>) -> Vec<CheckResult> {
    vec![
        check_initial_value(cell),
        check_read_write(cell),
        check_location_stability(cell),
        check_independence(cell),
    ]
}

/// The cell reads zero before anything has been written.
#[must_use]
pub fn check_initial_value(cell: &ErrnoCell<'_>) -> CheckResult {
    match cell.read() {
        Ok(0) => CheckResult::from_mismatches(CHECK_INITIAL_VALUE, 1, Vec::new()),
        Ok(value) => CheckResult::from_mismatches(
            CHECK_INITIAL_VALUE,
            1,
            vec![Mismatch {
                input: 0,
                expected: 0,
                actual: value,
                message: format!("errno should be zero on load, found {}", describe(value)),
            }],
        ),
        Err(err) => CheckResult::failed(CHECK_INITIAL_VALUE, 1, err.to_string()),
    }
}

/// Each write is observable by the very next read.
#[must_use]
pub fn check_read_write(cell: &ErrnoCell<'_>) -> CheckResult {
    let mut mismatches = Vec::new();
    for value in ROUND_TRIP_VALUES {
        let observed = cell.write(value).and_then(|()| cell.read());
        match observed {
            Ok(actual) if actual == value => {}
            Ok(actual) => mismatches.push(Mismatch {
                input: value,
                expected: value,
                actual,
                message: format!("wrote {value} to errno, read back {}", describe(actual)),
            }),
            Err(err) => {
                let checked = ROUND_TRIP_VALUES.len();
                return CheckResult::failed(CHECK_READ_WRITE, checked, err.to_string());
            }
        }
    }
    CheckResult::from_mismatches(CHECK_READ_WRITE, ROUND_TRIP_VALUES.len(), mismatches)
}

/// Two successive accessor calls return the same address.
#[must_use]
pub fn check_location_stability(cell: &ErrnoCell<'_>) -> CheckResult {
    let first = cell.address();
    let second = cell.address();
    match (first, second) {
        (Ok(a), Ok(b)) if a == b => {
            CheckResult::from_mismatches(CHECK_LOCATION_STABILITY, 1, Vec::new())
        }
        (Ok(a), Ok(b)) => CheckResult::failed(
            CHECK_LOCATION_STABILITY,
            1,
            format!("errno location moved between calls: {a:#x} then {b:#x}"),
        ),
        (Err(err), _) | (_, Err(err)) => {
            CheckResult::failed(CHECK_LOCATION_STABILITY, 1, err.to_string())
        }
    }
}

/// Writing the cell leaves caller-local state alone, and mutating caller-local
/// state leaves the cell alone.
#[must_use]
pub fn check_independence(cell: &ErrnoCell<'_>) -> CheckResult {
    const LOCAL: i32 = 42;
    const MARK: i32 = 999;

    let result = (|| {
        let previous = cell.read()?;
        let local = black_box(LOCAL);
        let neighbours = black_box([LOCAL; 8]);

        cell.write(MARK)?;
        let mut failures = Vec::new();
        if black_box(local) != LOCAL {
            failures.push(format!("local changed to {local} after writing errno"));
        }
        let neighbours = black_box(neighbours);
        if let Some(n) = neighbours.iter().find(|&&n| n != LOCAL) {
            failures.push(format!("neighbouring local changed to {n} after writing errno"));
        }

        let mut scratch = black_box([0i32; 8]);
        for (i, slot) in scratch.iter_mut().enumerate() {
            *slot = black_box(-(i as i32) - 1);
        }
        black_box(&scratch);
        let after = cell.read()?;
        if after != MARK {
            failures.push(format!(
                "errno changed to {} while only locals were written",
                describe(after)
            ));
        }

        cell.write(previous)?;
        Ok::<_, minilibc_loader::LoadError>(failures)
    })();

    match result {
        Ok(failures) if failures.is_empty() => {
            CheckResult::from_mismatches(CHECK_INDEPENDENCE, 3, Vec::new())
        }
        Ok(failures) => CheckResult::failed(CHECK_INDEPENDENCE, 3, failures.join("; ")),
        Err(err) => CheckResult::failed(CHECK_INDEPENDENCE, 3, err.to_string()),
    }
}

fn describe(value: i32) -> String {
    match errno::describe(value) {
        Some(name) => format!("{value} ({name})"),
        None => value.to_string(),
    }
}
