//! Fail-fast conformance checks.
//!
//! A check either prints a pass marker and lets the phase continue, or
//! captures the violated contract plus its source location for the driver to
//! report. Nothing is accumulated and nothing is retried: a single broken
//! syscall contract (say, a corrupting allocator) invalidates every check
//! that would run after it.
//!
//! Pass markers go to stdout. That stream is the operator-facing log of the
//! harness, not tracing output; the format is human-readable and carries no
//! schema guarantee.

use std::fmt;
use std::panic::Location;

/// A violated conformance check: what was expected, and where the check
/// lives in the harness source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{what} ({file}:{line})")]
pub struct CheckFailed {
    /// Description of the violated contract, with the underlying OS error
    /// appended when the check wrapped a fallible operation.
    pub what: String,
    /// Source file of the failing check.
    pub file: &'static str,
    /// Source line of the failing check.
    pub line: u32,
}

impl CheckFailed {
    fn here(what: String, location: &'static Location<'static>) -> Self {
        Self {
            what,
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Evaluates one conformance check.
///
/// On success prints `[PASS] {what}` and returns `Ok`. On failure returns
/// [`CheckFailed`] carrying the caller's file and line; the suite driver
/// turns the first failure into process termination.
///
/// # Errors
/// Returns [`CheckFailed`] when `condition` is false.
#[track_caller]
pub fn check(condition: bool, what: &'static str) -> Result<(), CheckFailed> {
    if condition {
        println!("[PASS] {what}");
        Ok(())
    } else {
        Err(CheckFailed::here(what.to_string(), Location::caller()))
    }
}

/// Like [`check`], but for fallible operations.
///
/// `Ok` passes the check and yields the value; `Err` fails the check with
/// the error's display appended to the description, so the operator sees
/// both the contract and the errno that broke it.
///
/// # Errors
/// Returns [`CheckFailed`] when `result` is an error.
#[track_caller]
pub fn check_ok<T, E: fmt::Display>(
    result: Result<T, E>,
    what: &'static str,
) -> Result<T, CheckFailed> {
    match result {
        Ok(value) => {
            println!("[PASS] {what}");
            Ok(value)
        }
        Err(e) => Err(CheckFailed::here(format!("{what}: {e}"), Location::caller())),
    }
}
