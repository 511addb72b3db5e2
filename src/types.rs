use semver::Version;
use std::path::PathBuf;

/// One resolvable Go build.
///
/// Records are constructed fresh on every invocation and never mutated:
/// the catalog produces `Remote` candidates, the probe produces the single
/// `Local` record for whatever is already on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: Version,
    pub source: Source,
}

/// Where a build lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Download URL for a not-yet-installed build.
    Remote(String),
    /// Install root of the build found on this host.
    Local(PathBuf),
}

impl VersionInfo {
    pub fn remote(version: Version, url: String) -> Self {
        Self {
            version,
            source: Source::Remote(url),
        }
    }

    pub fn local(version: Version, root: PathBuf) -> Self {
        Self {
            version,
            source: Source::Local(root),
        }
    }
}

/// Parse a version string that may omit the minor or patch component,
/// the way go.dev publishes them ("1.21" means "1.21.0").
pub(crate) fn parse_loose_version(s: &str) -> Result<Version, semver::Error> {
    let s = s.trim();
    match Version::parse(s) {
        Ok(v) => Ok(v),
        Err(err) => {
            let padded = match s.split('.').count() {
                1 => format!("{s}.0.0"),
                2 => format!("{s}.0"),
                _ => return Err(err),
            };
            Version::parse(&padded).map_err(|_| err)
        }
    }
}
