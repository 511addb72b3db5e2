use clap::Parser;
use std::path::PathBuf;

pub fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // If there's a git tag at HEAD, use just the tag (release build)
    if let Some(tag) = option_env!("GOUP_GIT_TAG") {
        return tag;
    }

    // Not on a tag - include commit hash and branch (dev build)
    let commit = option_env!("GOUP_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("GOUP_GIT_BRANCH").unwrap_or("unknown");

    // Return a static string by leaking the formatted string
    // This is safe because it only happens once at startup
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

/// `--version` selects the Go version to install, so clap's own version
/// flag is disabled and the tool's version hides behind `--tool-version`.
#[derive(Parser)]
#[command(name = "goup")]
#[command(about = "Upgrade or downgrade the local Go toolchain")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Go version to install ("latest" or a specific version like 1.21.5)
    #[arg(long, default_value = "latest")]
    pub version: String,

    /// Compute and report the decision without installing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Install root to replace (defaults to the per-OS location)
    #[arg(long)]
    pub install_path: Option<PathBuf>,

    /// Alternate release manifest endpoint (also GOUP_MANIFEST_URL)
    #[arg(long, hide = true)]
    pub manifest_url: Option<String>,

    /// Print goup's own version and exit
    #[arg(long)]
    pub tool_version: bool,

    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_defaults_to_latest() {
        let cli = Cli::parse_from(["goup"]);
        assert_eq!(cli.version, "latest");
        assert!(!cli.dry_run);
        assert!(cli.install_path.is_none());
    }

    #[test]
    fn specific_version_and_dry_run() {
        let cli = Cli::parse_from(["goup", "--version", "1.21.5", "--dry-run"]);
        assert_eq!(cli.version, "1.21.5");
        assert!(cli.dry_run);
    }

    #[test]
    fn install_path_override() {
        let cli = Cli::parse_from(["goup", "--install-path", "/opt/go"]);
        assert_eq!(cli.install_path, Some(PathBuf::from("/opt/go")));
    }
}
