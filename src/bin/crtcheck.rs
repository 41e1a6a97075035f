//! Syscall conformance suite entry point.
//!
//! Runs the six phases in their published order and translates the first
//! failure into a non-zero exit. The fail-fast contract is deliberate: a
//! single broken syscall invalidates trust in every check that would run
//! after it, so nothing is aggregated or retried.
//!
//! Arguments are echoed for diagnostics only; no flag alters behavior.

use std::process::ExitCode;

use tracing::debug;

use crtcheck::prelude::*;

fn main() -> ExitCode {
    init_tracing();

    println!("**********************************************");
    println!("*  crtcheck: syscall conformance harness     *");
    println!("**********************************************");
    let args: Vec<String> = std::env::args().collect();
    println!("args: {}", args.join(" "));

    let config = SuiteConfig::default();
    if let Err(e) = config.validate() {
        eprintln!("unusable suite configuration: {e}");
        return ExitCode::FAILURE;
    }

    let suite = standard_suite(config);
    debug!(phases = ?suite.phase_names(), "running conformance suite");

    match suite.run() {
        Ok(()) => {
            println!("\n[SUCCESS] all conformance phases passed");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            println!("[FAIL] {failure}");
            ExitCode::FAILURE
        }
    }
}

/// Ambient diagnostics go to stderr; stdout is reserved for the
/// operator-facing conformance log.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
