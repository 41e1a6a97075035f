//! Memory phase: three allocator paths with different expected backing.
//!
//! A C runtime services small allocations from its heap (brk or a cached
//! arena), routes oversized ones straight to mmap, and exposes mmap itself.
//! The checks here fault at the interesting places: the 1 MiB buffer is
//! touched only at its first and last byte, so a kernel that maps the base
//! address but never backs the boundary pages fails here and not somewhere
//! deep inside a later phase.

use std::hint::black_box;
use std::num::NonZeroUsize;

use nix::sys::mman::{MapFlags, ProtFlags, mmap_anonymous, munmap};
use tracing::debug;

use crtcheck_core::{Phase, Result, SuiteConfig, check, check_ok};

/// Integers in the small-heap probe.
const SMALL_COUNT: usize = 100;
/// Sum of 0..SMALL_COUNT, the closed form n(n-1)/2.
const SMALL_SUM: i64 = 4950;
/// Large enough that the allocator must fall back to page mapping.
const LARGE_SIZE: usize = 1024 * 1024;
/// One page for the explicit mapping probe.
const MAP_LEN: NonZeroUsize = match NonZeroUsize::new(4096) {
    Some(len) => len,
    None => unreachable!(),
};
/// Pattern round-tripped through the explicit mapping.
const MAP_PATTERN: i32 = 12345;

/// Validates small heap, large heap, and explicit anonymous mappings.
pub struct MemoryPhase;

impl Phase for MemoryPhase {
    fn name(&self) -> &'static str {
        "Memory"
    }

    fn run(&self, _config: &SuiteConfig) -> Result<()> {
        small_heap()?;
        large_heap()?;
        anonymous_mapping()?;
        Ok(())
    }
}

fn small_heap() -> Result<()> {
    println!("    small heap ({SMALL_COUNT} integers)");
    let sum = fill_and_sum(SMALL_COUNT);
    check(sum == SMALL_SUM, "small heap write/read integrity")?;
    Ok(())
}

/// Allocates `count` integers, fills them with 0..count, and sums them back.
/// Any aliasing or corruption in the allocation shows up as a wrong sum.
fn fill_and_sum(count: usize) -> i64 {
    let mut values: Vec<i64> = Vec::with_capacity(count);
    values.extend(black_box(0)..count as i64);
    // black_box keeps the allocation and the writes as real runtime work
    // instead of a folded constant
    let values = black_box(values);
    values.iter().sum()
}

fn large_heap() -> Result<()> {
    println!("    large heap ({LARGE_SIZE} bytes)");
    let mut buf = vec![0u8; LARGE_SIZE];
    buf[0] = b'A';
    buf[LARGE_SIZE - 1] = b'Z';
    // black_box keeps the boundary reads as real memory accesses
    let buf = black_box(buf);
    check(buf[0] == b'A', "large buffer head readable after write")?;
    check(buf[LARGE_SIZE - 1] == b'Z', "large buffer tail readable after write")?;
    Ok(())
}

#[allow(unsafe_code)]
fn anonymous_mapping() -> Result<()> {
    println!("    explicit anonymous mapping ({MAP_LEN} bytes)");
    // SAFETY: an anonymous private mapping with no fixed address has no
    // preconditions beyond the flags passed here.
    let mapped = unsafe {
        mmap_anonymous(
            None,
            MAP_LEN,
            ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
            MapFlags::MAP_PRIVATE,
        )
    };
    let mapping = check_ok(mapped, "anonymous private mapping")?;
    debug!(addr = ?mapping, len = MAP_LEN.get(), "mapped anonymous page");

    let cell = mapping.cast::<i32>().as_ptr();
    // SAFETY: the mapping is page-sized, readable and writable, and owned
    // exclusively by this phase until the munmap below.
    let observed = unsafe {
        cell.write_volatile(MAP_PATTERN);
        cell.read_volatile()
    };
    let round_trip = check(observed == MAP_PATTERN, "mapping write/read round trip");

    // Release before propagating any failure; the mapping belongs to this
    // phase alone.
    // SAFETY: `mapping` came from mmap_anonymous with exactly this length
    // and is not touched again.
    let released = unsafe { munmap(mapping, MAP_LEN.get()) };
    round_trip?;
    check_ok(released, "munmap releases the mapping")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn hundred_integers_sum_to_4950() {
        assert_eq!(fill_and_sum(SMALL_COUNT), SMALL_SUM);
    }

    #[test]
    fn empty_fill_sums_to_zero() {
        assert_eq!(fill_and_sum(0), 0);
    }

    #[test]
    fn memory_phase_passes_on_host() {
        assert!(MemoryPhase.run(&SuiteConfig::default()).is_ok());
    }

    #[test]
    fn anonymous_mapping_round_trips() {
        assert!(anonymous_mapping().is_ok());
    }

    proptest! {
        #[test]
        fn sum_matches_closed_form(count in 1usize..4096) {
            let expected = (count * (count - 1) / 2) as i64;
            prop_assert_eq!(fill_and_sum(count), expected);
        }
    }
}
