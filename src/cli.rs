use crate::config::{Packaging, DEFAULT_API_URL, DEFAULT_DOWNLOAD_URL};
use clap::Parser;
use std::path::PathBuf;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // If there's a git tag at HEAD, use just the tag (release build)
    if let Some(tag) = option_env!("SETUP_PANDOC_GIT_TAG") {
        return tag;
    }

    let commit = option_env!("SETUP_PANDOC_GIT_COMMIT").unwrap_or("unknown");

    // Only built once, for clap's --version output
    let version = format!("v{}-{}", BASE_VERSION, commit);
    Box::leak(version.into_boxed_str())
}

/// Every input falls back to the environment variable the runner sets, so
/// the binary can be used as an action step without any arguments.
#[derive(Parser, Debug)]
#[command(name = "setup-pandoc")]
#[command(about = "Install pandoc from GitHub Releases in CI pipelines")]
#[command(version = get_version())]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Pandoc version to install; empty or 'latest' picks the newest release
    #[arg(long = "pandoc-version", env = "INPUT_PANDOC-VERSION", default_value = "")]
    pub pandoc_version: String,

    /// Token for the GitHub API, raises the rate limit
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Install from the release archive or from the OS installer package
    #[arg(long, env = "INPUT_PACKAGING", default_value = "archive")]
    pub packaging: Packaging,

    /// Directory for downloads and extraction
    #[arg(long, env = "RUNNER_TEMP")]
    pub temp_dir: Option<PathBuf>,

    /// Root of the versioned tool cache
    #[arg(long, env = "RUNNER_TOOL_CACHE")]
    pub tool_cache: Option<PathBuf>,

    /// File that the runner reads PATH additions from
    #[arg(long, env = "GITHUB_PATH", hide = true)]
    pub path_file: Option<PathBuf>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, hide = true)]
    pub api_url: String,

    #[arg(
        long,
        env = "SETUP_PANDOC_DOWNLOAD_URL",
        default_value = DEFAULT_DOWNLOAD_URL,
        hide = true
    )]
    pub download_url: String,
}
