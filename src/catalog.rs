//! Remote release catalog.
//!
//! Fetches the go.dev download manifest, keeps the stable releases that
//! ship a build for the caller's platform, and yields them newest first.

use crate::platform::HostPlatform;
use crate::types::{parse_loose_version, VersionInfo};
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MANIFEST_URL: &str = "https://go.dev/dl";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to fetch release manifest: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("malformed release manifest: {0}")]
    Decode(String),
}

/// One release as published in the manifest. `?include=all` also returns
/// beta and rc entries, which carry `stable: false`.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRelease {
    pub version: String,
    pub stable: bool,
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

/// One downloadable file of a release. `sha256` and `size` are carried
/// through from the manifest but not verified here.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestFile {
    pub filename: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub kind: String,
}

pub struct Catalog {
    client: reqwest::Client,
    base_url: String,
}

impl Catalog {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("goup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// All stable releases with a build for `platform`, descending by version.
    ///
    /// An unparseable version on a stable release aborts the whole listing;
    /// a release that simply ships no file for this platform is dropped.
    pub async fn list_available(
        &self,
        platform: &HostPlatform,
    ) -> Result<Vec<VersionInfo>, CatalogError> {
        let url = format!("{}/?mode=json&include=all", self.base_url);
        tracing::debug!("Fetching release manifest from {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.text().await?;

        let releases: Vec<ManifestRelease> = serde_json::from_str(&body)
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        tracing::debug!("Manifest lists {} releases", releases.len());

        let mut versions = Vec::new();
        for release in releases {
            if !release.stable {
                continue;
            }

            let version = parse_release_version(&release.version)?;

            let file = release.files.iter().find(|f| {
                f.os == platform.os
                    && f.arch == platform.arch
                    && f.kind == platform.kind.as_str()
            });
            let Some(file) = file else {
                tracing::trace!(
                    "Release {} has no {}/{} {} file",
                    release.version,
                    platform.os,
                    platform.arch,
                    platform.kind.as_str()
                );
                continue;
            };

            versions.push(VersionInfo::remote(
                version,
                format!("{}/{}", self.base_url, file.filename),
            ));
        }

        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    /// Highest available version, or `None` if no release ships a build
    /// for this platform.
    pub async fn latest(&self, platform: &HostPlatform) -> Result<Option<VersionInfo>, CatalogError> {
        Ok(self.list_available(platform).await?.into_iter().next())
    }

    /// The release matching `requested` exactly, or `None` if the catalog
    /// has no such stable version for this platform.
    pub async fn specific(
        &self,
        requested: &str,
        platform: &HostPlatform,
    ) -> Result<Option<VersionInfo>, CatalogError> {
        let requested = parse_requested_version(requested)?;
        Ok(self
            .list_available(platform)
            .await?
            .into_iter()
            .find(|v| v.version == requested))
    }
}

/// Manifest versions carry the toolchain name as a prefix ("go1.21.3").
fn parse_release_version(raw: &str) -> Result<Version, CatalogError> {
    let stripped = raw.strip_prefix("go").unwrap_or(raw);
    parse_loose_version(stripped)
        .map_err(|e| CatalogError::Decode(format!("invalid release version '{raw}': {e}")))
}

/// User-supplied versions may carry a leading 'v'.
fn parse_requested_version(raw: &str) -> Result<Version, CatalogError> {
    let stripped = raw.strip_prefix('v').unwrap_or(raw);
    parse_loose_version(stripped)
        .map_err(|e| CatalogError::Decode(format!("invalid version '{raw}': {e}")))
}
