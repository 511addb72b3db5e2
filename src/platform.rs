use std::path::PathBuf;

/// What kind of artifact a release ships for a given platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Archive,
    Installer,
}

impl ArtifactKind {
    /// The manifest's `kind` value for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Archive => "archive",
            ArtifactKind::Installer => "installer",
        }
    }
}

/// The host as the release manifest names it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: String,
    pub arch: String,
    pub kind: ArtifactKind,
}

pub fn host_platform() -> HostPlatform {
    platform_for(std::env::consts::OS, std::env::consts::ARCH)
}

/// Map Rust's os/arch names onto the monikers go.dev publishes.
pub fn platform_for(os: &str, arch: &str) -> HostPlatform {
    let os = match os {
        "macos" => "darwin",
        other => other,
    };

    let arch = match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        // 32-bit ARM builds are published under the armv6l moniker
        "arm" => "armv6l",
        "x86" => "386",
        other => other,
    };

    // macOS and Windows get a native installer package, everything
    // else gets a tarball.
    let kind = if os == "darwin" || os == "windows" {
        ArtifactKind::Installer
    } else {
        ArtifactKind::Archive
    };

    HostPlatform {
        os: os.to_string(),
        arch: arch.to_string(),
        kind,
    }
}

/// Where the toolchain lives by default on this OS. Resolved once at
/// startup and threaded through explicitly.
pub fn default_install_path(os: &str) -> PathBuf {
    if os == "windows" {
        PathBuf::from(r"C:\Program Files\Go")
    } else {
        PathBuf::from("/usr/local/go")
    }
}
