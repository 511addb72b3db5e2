//! Artifact download.

use crate::install::InstallError;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Stream `url` to `local_path` with a progress bar.
///
/// On any transfer or write error the partial file is removed so a later
/// step can never mistake it for a complete artifact.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    local_path: &Path,
) -> Result<(), InstallError> {
    tracing::debug!("Downloading {} to {}", url, local_path.display());

    let result = stream_to_file(client, url, local_path).await;
    if result.is_err() {
        let _ = fs::remove_file(local_path);
    }
    result
}

async fn stream_to_file(
    client: &reqwest::Client,
    url: &str,
    local_path: &Path,
) -> Result<(), InstallError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let total_size = response.content_length().unwrap_or(0);

    let filename = local_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(format!("Downloading {}", filename));

    let mut file = fs::File::create(local_path)?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    pb.finish_with_message("Download complete");
    Ok(())
}
