//! crtcheck: syscall conformance harness for C-runtime-facing kernels.
//!
//! Two executables compose the harness:
//!
//! - `crtcheck`: the six-phase conformance suite (memory, file I/O,
//!   process, pipe, time, directory), fail-fast on the first violated
//!   contract
//! - `permfault-probe`: the page-permission union probe, whose pass signal
//!   is simply surviving a write to a writable global near code
//!
//! Both run as ordinary user-space programs atop the OS under test; the
//! kernel, not this crate, is the system being validated.

pub use crtcheck_core as core;
pub use crtcheck_phases as phases;

pub mod permfault;

/// Prelude module for common imports.
pub mod prelude {
    pub use crtcheck_core::{
        CheckFailed, Phase, PhaseError, Suite, SuiteConfig, SuiteFailure, check, check_ok,
    };
    pub use crtcheck_phases::standard_suite;
}
