//! Page-permission union probe.
//!
//! Prints the address of a function and of a writable global variable, then
//! writes the global from a different function. A loader that derives page
//! permissions from the union of the sections mapped into each page lets
//! this run to completion; one that applies a single section's permission
//! to a shared page kills the process on the store.
//!
//! There is no software assertion here. The absence of a fatal fault, plus
//! the printed modified value, constitutes the pass.

use crtcheck::permfault;

fn main() {
    let landmark: fn() = permfault::landmark;
    println!("function address: {:p}", landmark);
    println!("variable address: {:p}", permfault::probe_address());

    permfault::landmark();
    permfault::mutate();

    println!("modified value: {}", permfault::value());
}
