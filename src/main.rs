mod actions;
mod cache;
mod cli;
mod config;
mod download;
mod error;
mod install;
mod links;
mod platform;
mod release;
mod verify;
mod version;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::{Settings, TOOL_NAME};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli) {
        eprintln!("Could not set up logging: {}", e);
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            actions::set_failed(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let runner_debug = std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1");

    let level = if cli.quiet {
        "error"
    } else if cli.verbose > 0 || runner_debug {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stdout)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::from_cli(cli)?;
    let requested = cli.pandoc_version.trim();

    let version = release::resolve_version(requested, &settings).await;
    tracing::debug!(
        "Setting up {} version {} (user requested \"{}\")",
        TOOL_NAME,
        version,
        requested
    );

    let bin_dir = if let Some(cached) = cache::find(&settings, &version) {
        tracing::info!("Found in cache @ {}", cached.display());
        actions::add_path(&cached, settings.path_file.as_deref())?;
        Some(cached)
    } else {
        install::install(&settings, &version).await?
    };
    if let Some(bin_dir) = bin_dir {
        actions::prepend_process_path(&bin_dir)?;
    }

    tracing::info!("Successfully set up {} version {}", TOOL_NAME, version);
    verify::report_installed(settings.platform, &version)?;

    Ok(())
}
