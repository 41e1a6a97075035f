//! Suite configuration.
//!
//! Nothing here is driven by command-line flags; the published behavior of
//! the harness is exactly the defaults, and arguments are echoed, never
//! interpreted. The struct exists so phases stay parameterizable: tests
//! override scratch names and shorten the nap without touching phase logic.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::error::{PhaseError, Result};

/// Knobs shared by the conformance phases.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    /// Name of the scratch file the file I/O phase creates, round-trips,
    /// and removes. Must be a bare name; the file lives in the cwd.
    pub scratch_file: PathBuf,

    /// Name of the scratch directory the directory phase creates. Must be a
    /// bare name so cwd enumeration can observe it.
    pub scratch_dir: PathBuf,

    /// Whether the directory phase removes the scratch directory after
    /// enumeration. Off by default: the leftover directory is what makes a
    /// re-run exercise the tolerated mkdir-EEXIST path.
    pub remove_scratch_dir: bool,

    /// Requested suspension for the time phase.
    pub nap: Duration,

    /// Fraction of the nap that must measurably elapse. Below 1.0 to
    /// tolerate scheduler jitter; there is no upper bound on how long the
    /// nap may actually take.
    pub nap_floor: f64,

    /// Seconds-since-epoch under which the realtime clock is considered
    /// unset rather than merely early.
    pub clock_sanity_floor: i64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            scratch_file: PathBuf::from("crtcheck_scratch.txt"),
            scratch_dir: PathBuf::from("crtcheck_scratch_dir"),
            remove_scratch_dir: false,
            nap: Duration::from_millis(100),
            nap_floor: 0.9,
            clock_sanity_floor: 1000,
        }
    }
}

impl SuiteConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns a configuration error when the nap is zero, the nap floor is
    /// outside `(0, 1]`, or a scratch path is not a bare file name.
    pub fn validate(&self) -> Result<()> {
        if self.nap.is_zero() {
            return Err(PhaseError::config("nap must be non-zero"));
        }
        if !(self.nap_floor > 0.0 && self.nap_floor <= 1.0) {
            return Err(PhaseError::config("nap_floor must be in (0, 1]"));
        }
        if !is_bare_name(&self.scratch_file) {
            return Err(PhaseError::config(
                "scratch_file must be a bare file name in the cwd",
            ));
        }
        if !is_bare_name(&self.scratch_dir) {
            return Err(PhaseError::config(
                "scratch_dir must be a bare directory name in the cwd",
            ));
        }
        Ok(())
    }
}

/// A single normal path component, so the entry is observable when the
/// directory phase enumerates the cwd.
fn is_bare_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SuiteConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_nap_rejected() {
        let config = SuiteConfig {
            nap: Duration::ZERO,
            ..SuiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nap_floor_bounds() {
        for bad in [0.0, -0.5, 1.5] {
            let config = SuiteConfig {
                nap_floor: bad,
                ..SuiteConfig::default()
            };
            assert!(config.validate().is_err(), "nap_floor {bad} should be rejected");
        }
        let config = SuiteConfig {
            nap_floor: 1.0,
            ..SuiteConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_scratch_path_rejected() {
        let config = SuiteConfig {
            scratch_dir: PathBuf::from("tmp/scratch"),
            ..SuiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parent_traversal_rejected() {
        let config = SuiteConfig {
            scratch_file: PathBuf::from(".."),
            ..SuiteConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
