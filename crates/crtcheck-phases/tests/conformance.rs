//! End-to-end phase runs against the host kernel.
//!
//! The forking tests share a mutex: the test harness is multi-threaded, and
//! overlapping forks would race each other's wait() calls.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crtcheck_core::{Phase, SuiteConfig};
use crtcheck_phases::process::fork_exit_round_trip;
use crtcheck_phases::{PipePhase, ProcessPhase, standard_suite};

static FORK_LOCK: Mutex<()> = Mutex::new(());

fn fork_guard() -> MutexGuard<'static, ()> {
    // A fork test that panicked doesn't invalidate the lock.
    FORK_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn scratch_config(tag: &str) -> SuiteConfig {
    let pid = std::process::id();
    SuiteConfig {
        scratch_file: PathBuf::from(format!("crtcheck_it_{tag}_{pid}.txt")),
        scratch_dir: PathBuf::from(format!("crtcheck_it_{tag}_{pid}_dir")),
        remove_scratch_dir: true,
        nap: Duration::from_millis(20),
        ..SuiteConfig::default()
    }
}

#[test]
fn process_phase_passes() {
    let _guard = fork_guard();
    assert!(ProcessPhase.run(&SuiteConfig::default()).is_ok());
}

#[test]
fn pipe_phase_passes() {
    let _guard = fork_guard();
    assert!(PipePhase.run(&SuiteConfig::default()).is_ok());
}

#[test]
fn exit_codes_survive_the_round_trip() {
    let _guard = fork_guard();
    for code in [0, 7, 255] {
        let (reported, decoded) = fork_exit_round_trip(code).unwrap();
        assert!(reported, "waitpid returned a different pid for code {code}");
        assert_eq!(decoded, code);
    }
}

#[test]
fn standard_suite_passes_end_to_end() {
    let _guard = fork_guard();
    let config = scratch_config("suite");
    let suite = standard_suite(config.clone());
    let outcome = suite.run();
    assert!(outcome.is_ok(), "suite failed: {:?}", outcome.err());
    // Both scratch entries are gone: the file always, the directory because
    // cleanup mode was on.
    assert!(!Path::new(&config.scratch_file).exists());
    assert!(!Path::new(&config.scratch_dir).exists());
}
