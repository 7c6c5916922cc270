//! Host environment probing: program availability and the fontconfig
//! catalog.
//!
//! Diagnostics and font listing only talk to the host through
//! `EnvProber`, so they can be exercised against a fake environment.

use std::collections::BTreeSet;
use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

/// The fontconfig query tool.
pub const FONT_CATALOG_TOOL: &str = "fc-list";

/// Read-only view of the host's programs and fonts.
pub trait EnvProber {
    /// Returns true if `program` can be started from the execution path.
    fn has_program(&self, program: &str) -> bool;

    /// Distinct font family names, sorted. Each call queries the host.
    fn font_families(&self) -> io::Result<Vec<String>>;
}

/// Returns true if `families` names `family` (case-insensitive).
pub fn contains_family(families: &[String], family: &str) -> bool {
    families.iter().any(|f| f.eq_ignore_ascii_case(family))
}

/// Probes the real host by spawning processes.
pub struct SystemProber;

impl EnvProber for SystemProber {
    fn has_program(&self, program: &str) -> bool {
        let status = Command::new(program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(_) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                // Present but not runnable by us (permissions and the like).
                debug!(program, error = %e, "program probe failed");
                true
            }
        }
    }

    fn font_families(&self) -> io::Result<Vec<String>> {
        let output = Command::new(FONT_CATALOG_TOOL)
            .args([":", "family"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{FONT_CATALOG_TOOL} exited with {}",
                output.status
            )));
        }
        let listing = String::from_utf8_lossy(&output.stdout);
        let families = parse_family_listing(&listing);
        debug!(count = families.len(), "font families loaded");
        Ok(families)
    }
}

/// Parses `fc-list : family` output.
///
/// Each line may carry several comma-separated aliases for one family; all
/// of them are kept. The result is trimmed, deduplicated and sorted.
pub fn parse_family_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
