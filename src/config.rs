use crate::cli::Cli;
use crate::platform::{cache_arch, Platform};
use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const TOOL_NAME: &str = "pandoc";
pub const UPSTREAM_REPO: &str = "jgm/pandoc";

/// Last known good release, used when the latest release cannot be looked up.
pub const FALLBACK_VERSION: &str = "2.17.1.1";

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_DOWNLOAD_URL: &str = "https://github.com/jgm/pandoc/releases/download";

const RUNNER_DIR_NAME: &str = "actions";
const TEMP_DIR_NAME: &str = "temp";
const TOOL_CACHE_DIR_NAME: &str = "tool-cache";

/// How the release is installed on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Packaging {
    /// Release archive, unpacked into the tool cache and put on PATH.
    #[default]
    Archive,
    /// OS installer package (`.pkg` on mac, `.deb` on linux).
    Installer,
}

impl FromStr for Packaging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "archive" => Ok(Packaging::Archive),
            "installer" | "package" => Ok(Packaging::Installer),
            other => Err(format!(
                "Invalid packaging '{}'. Valid values: archive, installer",
                other
            )),
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Packaging::Archive => f.write_str("archive"),
            Packaging::Installer => f.write_str("installer"),
        }
    }
}

/// Run-wide settings, built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub platform: Platform,
    pub packaging: Packaging,
    pub arch: String,
    pub temp_dir: PathBuf,
    pub tool_cache_dir: PathBuf,
    pub path_file: Option<PathBuf>,
    pub token: Option<String>,
    pub api_base_url: String,
    pub download_base_url: String,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let platform = Platform::current();
        let runner_root = platform.base_location().join(RUNNER_DIR_NAME);

        let temp_dir =
            non_empty_path(cli.temp_dir.as_deref()).unwrap_or_else(|| runner_root.join(TEMP_DIR_NAME));
        let tool_cache_dir = non_empty_path(cli.tool_cache.as_deref())
            .unwrap_or_else(|| runner_root.join(TOOL_CACHE_DIR_NAME));

        let token = non_empty(cli.token.as_deref())
            .or_else(|| non_empty(std::env::var("GITHUB_TOKEN").ok().as_deref()));

        let settings = Self {
            platform,
            packaging: effective_packaging(platform, cli.packaging),
            arch: cache_arch(),
            temp_dir,
            tool_cache_dir,
            path_file: non_empty_path(cli.path_file.as_deref()),
            token,
            api_base_url: validate_base_url(&cli.api_url)?,
            download_base_url: validate_base_url(&cli.download_url)?,
        };
        settings.prepare_dirs()?;

        tracing::debug!("Platform: {} ({})", settings.platform, settings.arch);
        tracing::debug!("Temp directory: {}", settings.temp_dir.display());
        tracing::debug!("Tool cache directory: {}", settings.tool_cache_dir.display());
        if settings.token.is_some() {
            tracing::debug!("Using GitHub token for API requests");
        }

        Ok(settings)
    }

    fn prepare_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.temp_dir).with_context(|| {
            format!("Could not create temp directory {}", self.temp_dir.display())
        })?;
        fs::create_dir_all(&self.tool_cache_dir).with_context(|| {
            format!(
                "Could not create tool cache directory {}",
                self.tool_cache_dir.display()
            )
        })?;
        Ok(())
    }

    pub fn releases_url(&self) -> String {
        format!("{}/repos/{}/releases", self.api_base_url, UPSTREAM_REPO)
    }
}

fn effective_packaging(platform: Platform, requested: Packaging) -> Packaging {
    match (platform, requested) {
        (Platform::Windows, Packaging::Installer) => {
            tracing::warn!("Installer packages are not supported on windows, using the archive");
            Packaging::Archive
        }
        (_, packaging) => packaging,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_empty_path(value: Option<&Path>) -> Option<PathBuf> {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("Invalid URL '{}'", raw))?;
    if url.cannot_be_a_base() {
        return Err(anyhow!("URL '{}' cannot be used as a base", raw));
    }
    Ok(trimmed.to_string())
}
