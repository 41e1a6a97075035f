// Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # crtcheck-phases
//!
//! The six conformance phases of the harness, each validating one OS
//! subsystem end-to-end through the C runtime:
//!
//! - [`MemoryPhase`]: small heap, demand-paged large heap, explicit
//!   anonymous mapping
//! - [`FileIoPhase`]: create/truncate, write, seek, byte-exact read-back,
//!   unlink
//! - [`ProcessPhase`]: fork, post-fork heap isolation, exit-code fidelity
//!   through waitpid
//! - [`PipePhase`]: blocking byte-exact transfer from a forked writer
//! - [`TimePhase`]: realtime clock sanity and the suspension floor
//! - [`DirectoryPhase`]: idempotent mkdir visible to cwd enumeration
//!
//! Each phase is deterministic and owns its transient resources; see the
//! `Phase` contract in `crtcheck-core`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod directory;
pub mod file_io;
pub mod memory;
pub mod pipe;
pub mod process;
pub mod time;

pub use directory::DirectoryPhase;
pub use file_io::FileIoPhase;
pub use memory::MemoryPhase;
pub use pipe::PipePhase;
pub use process::ProcessPhase;
pub use time::TimePhase;

use crtcheck_core::{Phase, Suite, SuiteConfig};

/// Composes the phases in their published order.
///
/// Memory runs first: it is the substrate every later phase allocates
/// through, and a corrupting allocator would make the rest meaningless.
/// Directory runs last, after the other filesystem traffic has settled,
/// since it inspects state possibly left over from prior runs.
#[must_use]
pub fn standard_suite(config: SuiteConfig) -> Suite {
    let phases: Vec<Box<dyn Phase>> = vec![
        Box::new(MemoryPhase),
        Box::new(FileIoPhase),
        Box::new(ProcessPhase),
        Box::new(PipePhase),
        Box::new(TimePhase),
        Box::new(DirectoryPhase),
    ];
    Suite::new(config, phases)
}
