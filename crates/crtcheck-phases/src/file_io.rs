//! File I/O phase: byte-exact round trip through a scratch file.
//!
//! Round-trip law: writing a byte sequence to a freshly created/truncated
//! file, seeking to the start, and reading back exactly that many bytes must
//! yield the original sequence. The scratch file is removed on the success
//! path; the failure path exits without cleanup, an accepted limitation of
//! the harness rather than a contract of the OS under test.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};

use crtcheck_core::{Phase, Result, SuiteConfig, check, check_ok};

/// Known byte string round-tripped through the scratch file.
const PAYLOAD: &[u8] = b"Hello from the crtcheck scratch file!";

/// Validates open/write/seek/read/unlink through the C runtime.
pub struct FileIoPhase;

impl Phase for FileIoPhase {
    fn name(&self) -> &'static str {
        "File I/O"
    }

    fn run(&self, config: &SuiteConfig) -> Result<()> {
        let path = &config.scratch_file;
        println!("    scratch file: {}", path.display());

        let mut file = check_ok(
            File::options()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(path),
            "open scratch file for read/write",
        )?;

        let wrote = check_ok(file.write(PAYLOAD), "write payload")?;
        check(wrote == PAYLOAD.len(), "write count matches payload length")?;

        check_ok(file.seek(SeekFrom::Start(0)), "seek to start")?;

        let mut buf = vec![0u8; PAYLOAD.len()];
        check_ok(file.read_exact(&mut buf), "read back payload-length bytes")?;
        check(buf == PAYLOAD, "read-back bytes match payload")?;
        println!("    read back: {}", String::from_utf8_lossy(&buf));

        // Close before unlinking; the fd is this phase's only handle.
        drop(file);
        check_ok(fs::remove_file(path), "unlink scratch file")?;
        Ok(())
    }
}
