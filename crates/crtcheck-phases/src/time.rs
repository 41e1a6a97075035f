//! Time phase: realtime clock sanity and the suspension floor.
//!
//! Wall-clock timestamps are taken around a requested nap. The initial
//! seconds component must clear a small threshold; a zero or near-zero
//! clock means the OS never set it. The measured duration must reach the
//! tolerated fraction of the nap; there is deliberately no upper bound,
//! only a guard against a suspension that returns early or not at all.

use std::thread;
use std::time::Duration;

use nix::sys::time::TimeSpec;
use nix::time::{ClockId, clock_gettime};
use tracing::debug;

use crtcheck_core::{Phase, Result, SuiteConfig, check, check_ok};

/// Validates gettime/sleep semantics through the C runtime.
pub struct TimePhase;

impl Phase for TimePhase {
    fn name(&self) -> &'static str {
        "Time"
    }

    fn run(&self, config: &SuiteConfig) -> Result<()> {
        let start = check_ok(clock_gettime(ClockId::CLOCK_REALTIME), "read realtime clock")?;
        println!("    start: {}.{:06}", start.tv_sec(), start.tv_nsec() / 1000);
        check(
            start.tv_sec() > config.clock_sanity_floor,
            "realtime clock is set",
        )?;

        println!("    sleeping {}...", humantime::format_duration(config.nap));
        thread::sleep(config.nap);

        let end = check_ok(
            clock_gettime(ClockId::CLOCK_REALTIME),
            "read realtime clock after nap",
        )?;
        println!("    end: {}.{:06}", end.tv_sec(), end.tv_nsec() / 1000);

        let elapsed = elapsed_millis(start, end);
        let floor = floor_millis(config.nap, config.nap_floor);
        println!("    nap duration: {elapsed} ms");
        debug!(elapsed_ms = elapsed, floor_ms = floor, "nap measured");
        check(elapsed >= floor, "nap lasted at least the tolerated floor")?;
        Ok(())
    }
}

/// Wall-clock milliseconds between two timestamps.
fn elapsed_millis(start: TimeSpec, end: TimeSpec) -> i64 {
    (end.tv_sec() - start.tv_sec()) * 1000 + (end.tv_nsec() - start.tv_nsec()) / 1_000_000
}

/// Minimum measured milliseconds for a nap to count as honored.
fn floor_millis(nap: Duration, fraction: f64) -> i64 {
    (nap.as_millis() as f64 * fraction) as i64
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn elapsed_across_a_second_boundary() {
        let start = TimeSpec::new(100, 950_000_000);
        let end = TimeSpec::new(101, 50_000_000);
        assert_eq!(elapsed_millis(start, end), 100);
    }

    #[test]
    fn elapsed_zero_for_identical_timestamps() {
        let t = TimeSpec::new(1234, 567_000_000);
        assert_eq!(elapsed_millis(t, t), 0);
    }

    #[test]
    fn default_floor_is_ninety_ms() {
        assert_eq!(floor_millis(Duration::from_millis(100), 0.9), 90);
    }

    #[test]
    fn short_nap_phase_passes_on_host() {
        let config = SuiteConfig {
            nap: Duration::from_millis(20),
            ..SuiteConfig::default()
        };
        assert!(TimePhase.run(&config).is_ok());
    }

    proptest! {
        #[test]
        fn floor_never_exceeds_the_nap(ms in 1u64..10_000, fraction in 0.0f64..=1.0) {
            let floor = floor_millis(Duration::from_millis(ms), fraction);
            prop_assert!(floor <= ms as i64);
            prop_assert!(floor >= 0);
        }
    }
}
