//! Process phase: fork, post-fork heap isolation, exit-code fidelity.
//!
//! The child allocates heap memory strictly after the fork and writes to
//! it. Under copy-on-write (or any equivalent isolation) that write lands in
//! pages the parent never sees; a kernel that hands both processes the same
//! heap pages corrupts the parent here. The parent then waits for exactly
//! the child it forked and requires a normal termination with the exact
//! exit code the child used.

use std::hint::black_box;
use std::io::Write;

use nix::sys::wait::{WaitStatus, waitpid};
use nix::unistd::{ForkResult, fork, getpid, getppid};

use crtcheck_core::{Phase, Result, SuiteConfig, check, check_ok};

/// Deliberate child-exit sentinel. Reserved: never used as the harness's
/// own success or failure code.
pub const CHILD_EXIT_CODE: i32 = 42;

/// Validates fork/exit/wait semantics through the C runtime.
pub struct ProcessPhase;

impl Phase for ProcessPhase {
    fn name(&self) -> &'static str {
        "Process"
    }

    fn run(&self, _config: &SuiteConfig) -> Result<()> {
        println!("    parent pid: {}", getpid());
        let (reported, code) = fork_exit_round_trip(CHILD_EXIT_CODE)?;
        check(reported, "waitpid reports the forked child")?;
        println!("    child exited with code {code}");
        check(code == CHILD_EXIT_CODE, "child exit code preserved")?;
        Ok(())
    }
}

/// Forks, exits the child with `code`, and returns whether the waited pid
/// matched the forked child plus the exit code the parent decoded.
///
/// The child writes freshly allocated heap memory before exiting, so the
/// fork-isolation contract is exercised on every call.
///
/// # Errors
/// Fails when the fork or wait syscall fails, or when the child did not
/// terminate normally via exit.
#[allow(unsafe_code)]
pub fn fork_exit_round_trip(code: i32) -> Result<(bool, i32)> {
    // SAFETY: the harness is single-threaded; the child only allocates,
    // writes its own memory, and _exits.
    match check_ok(unsafe { fork() }, "fork")? {
        ForkResult::Child => {
            println!("    [child] pid={} ppid={}", getpid(), getppid());
            child_heap_probe();
            child_exit(code);
        }
        ForkResult::Parent { child } => {
            let status = check_ok(waitpid(child, None), "waitpid on forked child")?;
            if let WaitStatus::Exited(pid, decoded) = status {
                Ok((pid == child, decoded))
            } else {
                println!("    unexpected wait status: {status:?}");
                check(false, "child terminated normally via exit")?;
                Ok((false, -1))
            }
        }
    }
}

/// Heap allocated strictly after the fork; the write must never be
/// observable in the parent's view of its own memory.
fn child_heap_probe() {
    let mut scratch = vec![0u8; 10];
    scratch[0] = b'C';
    black_box(&scratch);
}

/// Terminates the forked child without running the parent's atexit handlers
/// or flushing inherited stdio buffers a second time. waitpid still reports
/// a normal exit with `code`.
#[allow(unsafe_code)]
pub(crate) fn child_exit(code: i32) -> ! {
    let _ = std::io::stdout().flush();
    // SAFETY: _exit only terminates the calling process.
    unsafe { libc::_exit(code) }
}
