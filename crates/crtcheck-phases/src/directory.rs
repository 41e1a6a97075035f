//! Directory phase: idempotent mkdir visible to enumeration.
//!
//! Creating a directory that survived a prior run must not be fatal.
//! EEXIST is the one tolerated non-fatal condition in the whole harness;
//! any other mkdir failure is a genuine filesystem error. The entry must
//! then appear when the cwd is enumerated in the same process: creation is
//! immediately visible, with no caching inconsistency. Enumeration is a
//! finite sequence and the handle is closed when dropped.

use std::fs;

use nix::errno::Errno;
use nix::sys::stat::Mode;
use nix::unistd::mkdir;

use crtcheck_core::{Phase, PhaseError, Result, SuiteConfig, check, check_ok};

/// Validates mkdir/enumeration semantics through the C runtime.
pub struct DirectoryPhase;

impl Phase for DirectoryPhase {
    fn name(&self) -> &'static str {
        "Directory"
    }

    fn run(&self, config: &SuiteConfig) -> Result<()> {
        let dir = &config.scratch_dir;

        match mkdir(dir.as_path(), Mode::from_bits_truncate(0o755)) {
            Err(Errno::EEXIST) => {
                println!("    {} left over from a prior run", dir.display());
            }
            created => {
                check_ok(created, "mkdir scratch directory")?;
            }
        }

        let entries = check_ok(fs::read_dir("."), "open cwd for enumeration")?;
        let mut found = false;
        println!("    entries:");
        for entry in entries {
            let entry = entry.map_err(|e| PhaseError::io("read directory entry", e))?;
            let name = entry.file_name();
            println!("      - {}", name.to_string_lossy());
            if name.as_os_str() == dir.as_os_str() {
                found = true;
            }
        }
        check(found, "enumeration lists the scratch directory")?;

        if config.remove_scratch_dir {
            check_ok(fs::remove_dir(dir), "remove scratch directory")?;
        }
        Ok(())
    }
}
