//! Upgrade/downgrade decision policy.

use crate::types::VersionInfo;
use semver::Version;
use std::fmt;

/// How the target version was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    Latest,
    Specific,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    UpToDate,
    Upgrade {
        /// `None` means nothing was installed.
        from: Option<Version>,
        to: Version,
    },
    Downgrade {
        from: Version,
        to: Version,
    },
}

/// Compare the installed baseline against the resolved target.
///
/// Latest mode never downgrades: a local build newer than the catalog is
/// left alone. An explicit version request moves in either direction.
pub fn decide(
    installed: Option<&VersionInfo>,
    target: &VersionInfo,
    mode: ResolveMode,
) -> Decision {
    let Some(current) = installed else {
        return Decision::Upgrade {
            from: None,
            to: target.version.clone(),
        };
    };

    match mode {
        ResolveMode::Latest => {
            if current.version >= target.version {
                Decision::UpToDate
            } else {
                Decision::Upgrade {
                    from: Some(current.version.clone()),
                    to: target.version.clone(),
                }
            }
        }
        ResolveMode::Specific => {
            if current.version == target.version {
                Decision::UpToDate
            } else if current.version > target.version {
                Decision::Downgrade {
                    from: current.version.clone(),
                    to: target.version.clone(),
                }
            } else {
                Decision::Upgrade {
                    from: Some(current.version.clone()),
                    to: target.version.clone(),
                }
            }
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::UpToDate => write!(f, "Go is up to date."),
            Decision::Upgrade { from: None, to } => write!(f, "Installing Go {to}"),
            Decision::Upgrade {
                from: Some(from),
                to,
            } => write!(f, "Upgrading {from} to {to}"),
            Decision::Downgrade { from, to } => write!(f, "Downgrading from {from} to {to}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;
    use std::path::PathBuf;

    fn local(major: u64, minor: u64, patch: u64) -> VersionInfo {
        VersionInfo {
            version: Version::new(major, minor, patch),
            source: Source::Local(PathBuf::from("/usr/local/go")),
        }
    }

    fn remote(major: u64, minor: u64, patch: u64) -> VersionInfo {
        VersionInfo {
            version: Version::new(major, minor, patch),
            source: Source::Remote("https://go.dev/dl/x.tar.gz".into()),
        }
    }

    #[test]
    fn latest_mode_upgrades_older_install() {
        let decision = decide(Some(&local(1, 20, 0)), &remote(1, 21, 0), ResolveMode::Latest);
        assert_eq!(
            decision,
            Decision::Upgrade {
                from: Some(Version::new(1, 20, 0)),
                to: Version::new(1, 21, 0)
            }
        );
    }

    #[test]
    fn latest_mode_is_noop_when_equal() {
        let decision = decide(Some(&local(1, 21, 0)), &remote(1, 21, 0), ResolveMode::Latest);
        assert_eq!(decision, Decision::UpToDate);
    }

    #[test]
    fn latest_mode_never_downgrades() {
        let decision = decide(Some(&local(1, 22, 0)), &remote(1, 21, 0), ResolveMode::Latest);
        assert_eq!(decision, Decision::UpToDate);
    }

    #[test]
    fn specific_mode_downgrades_newer_install() {
        let decision = decide(
            Some(&local(1, 22, 0)),
            &remote(1, 21, 0),
            ResolveMode::Specific,
        );
        assert_eq!(
            decision,
            Decision::Downgrade {
                from: Version::new(1, 22, 0),
                to: Version::new(1, 21, 0)
            }
        );
    }

    #[test]
    fn specific_mode_upgrades_older_install() {
        let decision = decide(
            Some(&local(1, 20, 0)),
            &remote(1, 21, 0),
            ResolveMode::Specific,
        );
        assert_eq!(
            decision,
            Decision::Upgrade {
                from: Some(Version::new(1, 20, 0)),
                to: Version::new(1, 21, 0)
            }
        );
    }

    #[test]
    fn specific_mode_is_noop_when_equal() {
        let decision = decide(
            Some(&local(1, 21, 0)),
            &remote(1, 21, 0),
            ResolveMode::Specific,
        );
        assert_eq!(decision, Decision::UpToDate);
    }

    #[test]
    fn not_installed_always_upgrades() {
        for mode in [ResolveMode::Latest, ResolveMode::Specific] {
            let decision = decide(None, &remote(1, 21, 0), mode);
            assert_eq!(
                decision,
                Decision::Upgrade {
                    from: None,
                    to: Version::new(1, 21, 0)
                }
            );
        }
    }
}
