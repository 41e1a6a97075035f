//! Phase abstraction and the sequential suite driver.
//!
//! Control flow is strictly sequential and synchronous: the driver invokes
//! phases in a fixed order and each phase runs to completion before the
//! next begins. There is no concurrency between phases; individual phases
//! may fork, but they reap their children before returning. A hung syscall
//! hangs the harness. That is deliberate: the harness is a diagnostic tool
//! and the OS under test is trusted to eventually return or fault.

use std::time::Instant;

use tracing::debug;

use crate::config::SuiteConfig;
use crate::error::{PhaseError, Result};

/// One self-contained block of related checks validating one OS subsystem.
///
/// A phase owns every transient resource it creates (files, mappings, pipe
/// ends, child processes) and releases them before returning, on both
/// sides of any fork it performs. Nothing is shared across phases.
pub trait Phase {
    /// Human-readable phase name, printed in the phase banner.
    fn name(&self) -> &'static str;

    /// Runs every check in the phase, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first violated contract or failed syscall. The error is
    /// fatal to the whole run; the driver does not continue past it.
    fn run(&self, config: &SuiteConfig) -> Result<()>;
}

/// The first failure observed by [`Suite::run`].
#[derive(Debug, thiserror::Error)]
#[error("phase {phase}: {error}")]
pub struct SuiteFailure {
    /// Name of the phase that failed.
    pub phase: &'static str,
    /// The failure itself.
    #[source]
    pub error: PhaseError,
}

/// A fixed, ordered sequence of phases with first-failure semantics.
///
/// Phases are plain trait objects driven by a single loop, so they can be
/// added, removed, or reordered without touching shared state.
pub struct Suite {
    config: SuiteConfig,
    phases: Vec<Box<dyn Phase>>,
}

impl Suite {
    /// Creates a suite over an explicit phase order.
    #[must_use]
    pub fn new(config: SuiteConfig, phases: Vec<Box<dyn Phase>>) -> Self {
        Self { config, phases }
    }

    /// The configuration the phases will run under.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Phase names in execution order.
    #[must_use]
    pub fn phase_names(&self) -> Vec<&'static str> {
        self.phases.iter().map(|p| p.name()).collect()
    }

    /// Runs the phases in order, stopping at the first failure.
    ///
    /// Prints the phase banner for each phase before running it. Phases
    /// after a failing one do not run: their contracts may depend on the
    /// one that just broke.
    ///
    /// # Errors
    /// Returns the failing phase's name and error.
    pub fn run(&self) -> std::result::Result<(), SuiteFailure> {
        for phase in &self.phases {
            println!("\n[TEST] === {} ===", phase.name());
            let started = Instant::now();
            phase.run(&self.config).map_err(|error| SuiteFailure {
                phase: phase.name(),
                error,
            })?;
            debug!(phase = phase.name(), elapsed = ?started.elapsed(), "phase passed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::check::CheckFailed;

    /// Records its own runs into a shared journal; fails on demand.
    struct JournalPhase {
        name: &'static str,
        fail: bool,
        journal: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Phase for JournalPhase {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(&self, _config: &SuiteConfig) -> Result<()> {
            self.journal.lock().unwrap().push(self.name);
            if self.fail {
                Err(CheckFailed {
                    what: "deliberate failure".to_string(),
                    file: "phase.rs",
                    line: 0,
                }
                .into())
            } else {
                Ok(())
            }
        }
    }

    fn journal_suite(spec: &[(&'static str, bool)]) -> (Suite, Arc<Mutex<Vec<&'static str>>>) {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let phases: Vec<Box<dyn Phase>> = spec
            .iter()
            .map(|&(name, fail)| {
                Box::new(JournalPhase {
                    name,
                    fail,
                    journal: Arc::clone(&journal),
                }) as Box<dyn Phase>
            })
            .collect();
        (Suite::new(SuiteConfig::default(), phases), journal)
    }

    #[test]
    fn phases_run_in_declared_order() {
        let (suite, journal) = journal_suite(&[("a", false), ("b", false), ("c", false)]);
        assert!(suite.run().is_ok());
        assert_eq!(*journal.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn first_failure_stops_the_suite() {
        let (suite, journal) = journal_suite(&[("a", false), ("b", true), ("c", false)]);
        let failure = suite.run().unwrap_err();
        assert_eq!(failure.phase, "b");
        // "c" never ran
        assert_eq!(*journal.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn failure_display_names_the_phase() {
        let (suite, _journal) = journal_suite(&[("memory", true)]);
        let failure = suite.run().unwrap_err();
        assert!(failure.to_string().starts_with("phase memory: "));
    }

    #[test]
    fn empty_suite_passes() {
        let suite = Suite::new(SuiteConfig::default(), Vec::new());
        assert!(suite.run().is_ok());
        assert!(suite.phase_names().is_empty());
    }

    #[test]
    fn phase_names_reflect_order() {
        let (suite, _journal) = journal_suite(&[("x", false), ("y", false)]);
        assert_eq!(suite.phase_names(), vec!["x", "y"]);
    }
}
