//! Pipe phase: blocking byte-exact transfer from a forked writer.
//!
//! The parent's single blocking read must return a positive count and the
//! exact bytes the child wrote. A read that returns "no data" while the
//! writer still holds its end open breaks the blocking contract. The
//! parent's wait on the child orders the child's write and termination
//! before the parent's final checks.

use std::fs::File;
use std::io::{Read, Write};

use nix::sys::wait::wait;
use nix::unistd::{ForkResult, fork, pipe};

use crtcheck_core::{Phase, Result, SuiteConfig, check, check_ok};

use crate::process::child_exit;

/// Fixed message the forked child writes into the pipe.
const MESSAGE: &[u8] = b"Pipe data from forked child";

/// Validates unidirectional pipe semantics through the C runtime.
pub struct PipePhase;

impl Phase for PipePhase {
    fn name(&self) -> &'static str {
        "Pipe"
    }

    #[allow(unsafe_code)]
    fn run(&self, _config: &SuiteConfig) -> Result<()> {
        let (read_end, write_end) = check_ok(pipe(), "pipe creation")?;

        // SAFETY: the harness is single-threaded; the child only writes to
        // its pipe end and _exits.
        match check_ok(unsafe { fork() }, "fork pipe writer")? {
            ForkResult::Child => {
                // Close the unused read end first; the parent must still
                // block until our write, not see a closed pipe.
                drop(read_end);
                let mut writer = File::from(write_end);
                let wrote = writer.write_all(MESSAGE).is_ok();
                drop(writer);
                child_exit(i32::from(!wrote));
            }
            ForkResult::Parent { .. } => {
                drop(write_end);
                let mut reader = File::from(read_end);
                let mut buf = [0u8; 64];
                let count = check_ok(reader.read(&mut buf), "blocking read from pipe")?;
                check(count > 0, "pipe read returned data")?;
                println!(
                    "    received {count} bytes: {}",
                    String::from_utf8_lossy(&buf[..count])
                );
                check(&buf[..count] == MESSAGE, "pipe bytes match the message")?;
                drop(reader);

                // Reap the writer; any child of ours qualifies, there is
                // exactly one.
                check_ok(wait(), "reap pipe writer")?;
            }
        }
        Ok(())
    }
}
