//! Page-permission union probe support.
//!
//! Contract under test: the program loader must give any page holding
//! writable global data at least read+write permission, even when that page
//! also holds (or sits next to) executable code from another compiled
//! unit's section. The effective protection of a page is the union of the
//! requirements of every section mapped into it, not whichever section was
//! applied first or last.
//!
//! The probe variable must be genuine static storage with process lifetime.
//! The entire test hinges on how the loader maps static-storage sections
//! into pages; a stack or heap stand-in would probe nothing. Do not "fix"
//! this into a local.

use std::sync::atomic::{AtomicI32, Ordering};

/// Initial value of the probe variable, forcing it into initialized
/// writable storage rather than the zeroed section.
pub const INITIAL: i32 = 123;

/// Value [`mutate`] stores.
pub const MUTATED: i32 = 456;

/// Writable process-global whose page proximity to code is the subject
/// under test.
static PROBE: AtomicI32 = AtomicI32::new(INITIAL);

/// Code whose address is printed so an operator can eyeball how close the
/// probe variable sits to an executable page.
#[inline(never)]
pub fn landmark() {
    println!("hello from the probe's code");
}

/// Writes the probe variable, deliberately from a different function than
/// [`landmark`], whose address the operator compared against. The OS
/// killing the process on this store is the failure signal; there is no
/// software assertion.
#[inline(never)]
pub fn mutate() {
    PROBE.store(MUTATED, Ordering::Relaxed);
}

/// Current value of the probe variable.
#[must_use]
pub fn value() -> i32 {
    PROBE.load(Ordering::Relaxed)
}

/// Address of the probe variable, for the proximity diagnostic.
#[must_use]
pub fn probe_address() -> *const AtomicI32 {
    &raw const PROBE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_is_observable() {
        mutate();
        assert_eq!(value(), MUTATED);
    }

    #[test]
    fn probe_has_an_address() {
        assert!(!probe_address().is_null());
    }
}
