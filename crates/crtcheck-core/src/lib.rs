// Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # crtcheck-core
//!
//! Assertion engine and phase driver for the crtcheck conformance harness.
//!
//! The harness validates an OS kernel through the contracts a C runtime
//! assumes of it. This crate holds the parts that are independent of any
//! particular syscall:
//!
//! - [`check`] / [`check_ok`]: fail-fast conformance checks with source
//!   locations
//! - [`Phase`]: one self-contained block of checks for one OS subsystem
//! - [`Suite`]: the fixed sequential driver with first-failure semantics
//! - [`SuiteConfig`]: validated knobs shared by the phases
//!
//! Phase logic itself stays exception-free: a phase returns `Ok` or the
//! first [`PhaseError`], and only the top-level binary turns that into
//! process termination. That keeps every phase testable in isolation while
//! preserving the stop-the-world contract of the original harness.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod check;
pub mod config;
pub mod error;
pub mod phase;

pub use check::{CheckFailed, check, check_ok};
pub use config::SuiteConfig;
pub use error::{PhaseError, Result};
pub use phase::{Phase, Suite, SuiteFailure};
