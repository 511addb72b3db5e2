//! Installed-toolchain probe.
//!
//! Finds the `go` binary on PATH, walks up to its install root, and reads
//! the VERSION marker file the distribution ships there.

use crate::types::{parse_loose_version, VersionInfo};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// Distinguished state, not a failure: callers treat this as
    /// "proceed as a fresh install".
    #[error("go not installed")]
    NotInstalled,
    #[error("error reading go version file: {0}")]
    VersionFile(#[source] std::io::Error),
    #[error("could not parse installed go version: {0}")]
    VersionParse(String),
}

const GO_BINARY: &str = if cfg!(windows) { "go.exe" } else { "go" };

/// Version and install root of the toolchain on this host.
pub fn installed_version() -> Result<VersionInfo, ProbeError> {
    let go_path = which::which(GO_BINARY).map_err(|_| ProbeError::NotInstalled)?;
    tracing::debug!("Found go binary at {}", go_path.display());

    // The binary sits in <root>/bin/go, so the root is two levels up.
    let root = go_path
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or(ProbeError::NotInstalled)?;

    version_at_root(root)
}

/// Read the VERSION marker inside an install root.
pub fn version_at_root(root: PathBuf) -> Result<VersionInfo, ProbeError> {
    let marker = root.join("VERSION");
    let content = fs::read_to_string(&marker).map_err(ProbeError::VersionFile)?;

    let re = Regex::new(r"go([0-9]+\.[0-9]+(?:\.[0-9]+)?)").unwrap();
    let captures = re.captures(&content).ok_or_else(|| {
        ProbeError::VersionParse(format!(
            "no go version marker in {}",
            marker.display()
        ))
    })?;

    let version = parse_loose_version(&captures[1])
        .map_err(|e| ProbeError::VersionParse(e.to_string()))?;

    tracing::debug!("Installed go {} at {}", version, root.display());
    Ok(VersionInfo::local(version, root))
}
