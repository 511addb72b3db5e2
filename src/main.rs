mod catalog;
mod cli;
mod decision;
mod download;
mod install;
mod platform;
mod probe;
mod types;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use decision::{Decision, ResolveMode};
use types::Source;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(&cli);

    if let Err(err) = run(&cli).await {
        println!("[!] {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    if cli.tool_version {
        println!("goup {}", cli::get_version());
        return Ok(());
    }

    let host = platform::host_platform();
    tracing::debug!("Host platform: {}/{}", host.os, host.arch);

    let manifest_url = cli
        .manifest_url
        .clone()
        .or_else(|| std::env::var("GOUP_MANIFEST_URL").ok())
        .unwrap_or_else(|| catalog::DEFAULT_MANIFEST_URL.to_string());
    let catalog = catalog::Catalog::new(&manifest_url)?;

    let mode = if cli.version == "latest" {
        ResolveMode::Latest
    } else {
        ResolveMode::Specific
    };

    let target = match mode {
        ResolveMode::Latest => catalog.latest(&host).await?,
        ResolveMode::Specific => catalog.specific(&cli.version, &host).await?,
    };
    let Some(target) = target else {
        println!("[!] No versions for your OS and Architecture");
        return Ok(());
    };

    let installed = match probe::installed_version() {
        Ok(info) => Some(info),
        Err(probe::ProbeError::NotInstalled) => {
            println!("[+] Go not installed");
            None
        }
        Err(err) => return Err(err.into()),
    };

    let decision = decision::decide(installed.as_ref(), &target, mode);
    println!("[+] {}", decision);
    if decision == Decision::UpToDate {
        return Ok(());
    }

    if cli.dry_run {
        tracing::info!("Dry run, not installing");
        return Ok(());
    }

    // Replace whatever root the probe found; fall back to the explicit
    // override, then the per-OS default, for fresh installs.
    let install_path = cli
        .install_path
        .clone()
        .or_else(|| {
            installed.as_ref().and_then(|info| match &info.source {
                Source::Local(root) => Some(root.clone()),
                Source::Remote(_) => None,
            })
        })
        .unwrap_or_else(|| platform::default_install_path(&host.os));

    let strategy = install::strategy_for(&host.os);
    install::install_version(strategy.as_ref(), catalog.http_client(), &target, &install_path)
        .await?;

    Ok(())
}

fn setup_logging(cli: &Cli) {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();
}
