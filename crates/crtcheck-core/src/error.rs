//! Error types for the conformance harness.
//!
//! Every variant is fatal to the run. There is no retry path and no
//! aggregation: the driver reports the first failure and the binary exits
//! non-zero. The single tolerated non-fatal condition in the whole harness
//! (mkdir on an already-existing scratch directory) is handled inside the
//! directory phase and never becomes a `PhaseError`.

use nix::errno::Errno;

use crate::check::CheckFailed;

/// Result type alias for phase execution.
pub type Result<T> = std::result::Result<T, PhaseError>;

/// A failure surfaced by a phase.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    /// An observed behavior diverged from the expected syscall contract.
    #[error("{0}")]
    Check(#[from] CheckFailed),

    /// A syscall failed outside an explicit check.
    #[error("{what}: {source}")]
    Sys {
        /// What the harness was doing.
        what: &'static str,
        /// The errno reported by the OS under test.
        #[source]
        source: Errno,
    },

    /// An I/O operation failed outside an explicit check.
    #[error("{what}: {source}")]
    Io {
        /// What the harness was doing.
        what: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The suite configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PhaseError {
    /// Creates a syscall error.
    #[must_use]
    pub const fn sys(what: &'static str, source: Errno) -> Self {
        Self::Sys { what, source }
    }

    /// Creates an I/O error.
    #[must_use]
    pub const fn io(what: &'static str, source: std::io::Error) -> Self {
        Self::Io { what, source }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sys_error_display() {
        let err = PhaseError::sys("mkdir scratch directory", Errno::EACCES);
        let text = err.to_string();
        assert!(text.starts_with("mkdir scratch directory: "));
        assert!(text.contains("EACCES"));
    }

    #[test]
    fn config_error_display() {
        let err = PhaseError::config("nap must be non-zero");
        assert_eq!(err.to_string(), "configuration error: nap must be non-zero");
    }

    #[test]
    fn check_failure_converts() {
        let failed = CheckFailed {
            what: "child exit code preserved".to_string(),
            file: "process.rs",
            line: 9,
        };
        let err = PhaseError::from(failed);
        assert!(matches!(err, PhaseError::Check(_)));
        assert_eq!(err.to_string(), "child exit code preserved (process.rs:9)");
    }
}
