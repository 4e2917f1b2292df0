use crate::actions;
use crate::config::TOOL_NAME;
use crate::error::InstallError;
use crate::platform::Platform;
use crate::version::{compare, Comparison};
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;

pub fn locate_executable(platform: Platform, version: &str) -> Result<PathBuf, InstallError> {
    which::which(platform.executable_name(TOOL_NAME)).map_err(|_| InstallError::NotOnPath {
        version: version.to_string(),
    })
}

pub fn version_output(executable: &Path) -> Result<String> {
    let output = Command::new(executable)
        .arg("--version")
        .output()
        .with_context(|| format!("Could not run {}", executable.display()))?;

    if !output.status.success() {
        return Err(anyhow!(
            "{} --version exited with {}",
            executable.display(),
            output.status
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Version from the first line of `pandoc --version`, e.g. "pandoc 3.1.2".
pub fn reported_version(output: &str) -> Option<String> {
    let re = Regex::new(r"^pandoc(?:\.exe)?\s+(\S+)").ok()?;
    let first_line = output.lines().next()?;
    re.captures(first_line.trim())
        .map(|caps| caps[1].to_string())
}

/// Runs the installed pandoc and logs what it reports about itself.
pub fn report_installed(platform: Platform, version: &str) -> Result<()> {
    let executable = locate_executable(platform, version)?;
    tracing::debug!("Found pandoc at {}", executable.display());

    let output = version_output(&executable)?;

    actions::start_group("Pandoc Information");
    println!("{}", output.trim_end());
    actions::end_group();

    match reported_version(&output) {
        Some(reported) if compare(&reported, version, Comparison::Equal) => {
            tracing::info!("pandoc {} is ready", reported);
        }
        Some(reported) => actions::warning(&format!(
            "Requested pandoc {} but {} reports version {}",
            version,
            executable.display(),
            reported
        )),
        None => tracing::warn!("Could not read a version from `pandoc --version`"),
    }

    Ok(())
}
