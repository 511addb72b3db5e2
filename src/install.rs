//! Platform install strategies.
//!
//! Replacing the toolchain under /usr/local (or Program Files) is the
//! privileged part of the run. Each OS gets its own strategy; the
//! orchestration around it (download, remove-if-present, install, cleanup)
//! is shared.
//!
//! There is no rollback: once the prior installation has been removed, a
//! failed extraction leaves the host without a working toolchain. The
//! error is surfaced rather than masked.

use crate::download::download_file;
use crate::types::{Source, VersionInfo};
use semver::Version;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("elevated command `{command}` exited with {status}")]
    Elevated { command: String, status: ExitStatus },
    #[error("installer exited with {status}")]
    Installer { status: ExitStatus },
    #[error("version {0} has no download URL")]
    NoRemoteSource(Version),
}

/// OS-specific removal and installation of one toolchain build.
pub trait InstallStrategy {
    /// Remove an existing installation root.
    fn remove(&self, install_path: &Path) -> Result<(), InstallError>;

    /// Put the downloaded artifact's contents into place.
    fn install(&self, artifact: &Path, install_path: &Path) -> Result<(), InstallError>;

    /// Whether the prior installation must be removed first. Installers
    /// that upgrade in place return false.
    fn removes_before_install(&self) -> bool {
        true
    }
}

/// Pick the strategy for a manifest-style OS name.
pub fn strategy_for(os: &str) -> Box<dyn InstallStrategy> {
    match os {
        "windows" => Box::new(MsiInstaller),
        "darwin" => Box::new(PkgInstaller),
        _ => Box::new(TarballInstaller),
    }
}

/// Download, remove the prior install if the strategy calls for it,
/// install, and clean up the downloaded artifact.
pub async fn install_version(
    strategy: &dyn InstallStrategy,
    client: &reqwest::Client,
    target: &VersionInfo,
    install_path: &Path,
) -> Result<(), InstallError> {
    let Source::Remote(url) = &target.source else {
        return Err(InstallError::NoRemoteSource(target.version.clone()));
    };
    let filename = url.rsplit('/').next().unwrap_or("go-artifact");

    println!("[+] Downloading {}", filename);
    let download_dir = tempfile::Builder::new().prefix("goup-").tempdir()?;
    let artifact = download_dir.path().join(filename);
    download_file(client, url, &artifact).await?;

    if strategy.removes_before_install() && install_path.exists() {
        println!("[+] Removing current version");
        strategy.remove(install_path)?;
    }

    println!("[+] Installing {}", target.version);
    strategy.install(&artifact, install_path)?;

    println!("[+] Cleaning up...");
    if let Err(e) = download_dir.close() {
        tracing::warn!("Could not remove downloaded artifact: {}", e);
    }

    Ok(())
}

/// Run a shell command under sudo with the terminal attached, so the
/// password prompt is visible and answerable.
fn run_elevated(command: &str) -> Result<(), InstallError> {
    tracing::debug!("Running elevated: {}", command);

    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("sudo {}", command))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(InstallError::Elevated {
            command: command.to_string(),
            status,
        });
    }
    Ok(())
}

fn remove_command(install_path: &Path) -> String {
    format!(r#"rm -r "{}""#, install_path.display())
}

fn extract_command(artifact: &Path, install_path: &Path) -> String {
    // Release tarballs contain a top-level go/ directory, so extraction
    // targets the parent of the install root.
    let parent = install_path.parent().unwrap_or_else(|| Path::new("/"));
    format!(
        r#"tar -C "{}" -xzf "{}""#,
        parent.display(),
        artifact.display()
    )
}

/// Unix: privileged removal and tarball extraction.
pub struct TarballInstaller;

impl InstallStrategy for TarballInstaller {
    fn remove(&self, install_path: &Path) -> Result<(), InstallError> {
        run_elevated(&remove_command(install_path))
    }

    fn install(&self, artifact: &Path, install_path: &Path) -> Result<(), InstallError> {
        run_elevated(&extract_command(artifact, install_path))
    }
}

/// macOS: privileged removal, then the native .pkg installer. `open -W`
/// blocks until the (possibly GUI) installer exits.
pub struct PkgInstaller;

impl InstallStrategy for PkgInstaller {
    fn remove(&self, install_path: &Path) -> Result<(), InstallError> {
        run_elevated(&remove_command(install_path))
    }

    fn install(&self, artifact: &Path, _install_path: &Path) -> Result<(), InstallError> {
        let status = Command::new("open")
            .arg("-W")
            .arg(artifact)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(InstallError::Installer { status });
        }
        Ok(())
    }
}

/// Windows: msiexec upgrades in place, no removal step.
pub struct MsiInstaller;

impl InstallStrategy for MsiInstaller {
    fn remove(&self, _install_path: &Path) -> Result<(), InstallError> {
        Ok(())
    }

    fn install(&self, artifact: &Path, _install_path: &Path) -> Result<(), InstallError> {
        let status = Command::new("msiexec")
            .arg("/i")
            .arg(artifact)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(InstallError::Installer { status });
        }
        Ok(())
    }

    fn removes_before_install(&self) -> bool {
        false
    }
}
