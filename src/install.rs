//! Per-platform pandoc installation.
//!
//! Archive installs are unpacked, copied into the tool cache and put on
//! PATH. Installer-package installs hand the package to the OS installer,
//! which places pandoc on PATH itself.

use crate::actions;
use crate::cache;
use crate::config::{Packaging, Settings};
use crate::download::{download_file, extract_tar_gz, extract_zip, move_file};
use crate::error::InstallError;
use crate::links::{archive_bin_dir, build_descriptor};
use crate::platform::Platform;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

type Extractor = fn(&Path, &Path) -> Result<()>;

/// Installs `version` for the configured platform. Returns the directory
/// added to PATH, or `None` when an OS installer took care of it.
pub async fn install(settings: &Settings, version: &str) -> Result<Option<PathBuf>, InstallError> {
    tracing::info!(
        "Installing pandoc {} for {} ({})",
        version,
        settings.platform,
        settings.packaging
    );

    match settings.platform {
        Platform::Windows => install_windows(settings, version).await.map(Some),
        Platform::Mac => install_mac(settings, version).await,
        Platform::Linux => install_linux(settings, version).await,
    }
}

async fn install_windows(settings: &Settings, version: &str) -> Result<PathBuf, InstallError> {
    let archive = fetch_artifact(settings, Packaging::Archive, version).await?;
    install_from_archive(settings, &archive, version, extract_zip)
}

async fn install_mac(settings: &Settings, version: &str) -> Result<Option<PathBuf>, InstallError> {
    let artifact = fetch_artifact(settings, settings.packaging, version).await?;
    match settings.packaging {
        Packaging::Archive => install_from_archive(settings, &artifact, version, extract_zip).map(Some),
        Packaging::Installer => {
            let package = artifact.to_string_lossy();
            run_privileged(
                "installer",
                &["-allowUntrusted", "-dumplog", "-pkg", &*package, "-target", "/"],
            )
            .map_err(|e| InstallError::install(version, e))?;
            Ok(None)
        }
    }
}

async fn install_linux(settings: &Settings, version: &str) -> Result<Option<PathBuf>, InstallError> {
    let artifact = fetch_artifact(settings, settings.packaging, version).await?;
    match settings.packaging {
        Packaging::Archive => {
            install_from_archive(settings, &artifact, version, extract_tar_gz).map(Some)
        }
        Packaging::Installer => {
            install_deb(&artifact).map_err(|e| InstallError::install(version, e))?;
            Ok(None)
        }
    }
}

/// Downloads the release artifact to `<temp>/<file name>`. The file name
/// matters to the OS installers, so the download is staged first and then
/// moved into place.
async fn fetch_artifact(
    settings: &Settings,
    packaging: Packaging,
    version: &str,
) -> Result<PathBuf, InstallError> {
    let descriptor =
        build_descriptor(&settings.download_base_url, settings.platform, packaging, version);

    let staging =
        TempDir::new_in(&settings.temp_dir).map_err(|e| InstallError::download(version, e))?;
    let staged = staging.path().join(&descriptor.file_name);

    download_file(&descriptor.url, &staged)
        .await
        .map_err(|e| InstallError::download(version, e))?;

    let target = settings.temp_dir.join(&descriptor.file_name);
    move_file(&staged, &target).map_err(|e| InstallError::download(version, e))?;
    tracing::debug!("Release artifact stored at {}", target.display());

    Ok(target)
}

fn install_from_archive(
    settings: &Settings,
    archive: &Path,
    version: &str,
    extract: Extractor,
) -> Result<PathBuf, InstallError> {
    let extraction =
        TempDir::new_in(&settings.temp_dir).map_err(|e| InstallError::extract(version, e))?;
    extract(archive, extraction.path()).map_err(|e| InstallError::extract(version, e))?;

    let relative = archive_bin_dir(settings.platform, version);
    let bin_dir = if relative.is_empty() {
        extraction.path().to_path_buf()
    } else {
        extraction.path().join(&relative)
    };
    if !bin_dir.is_dir() {
        return Err(InstallError::extract(
            version,
            anyhow!("archive has no '{}' directory", relative),
        ));
    }
    tracing::debug!("pandoc binaries found in {}", bin_dir.display());

    let cached =
        cache::cache_dir(settings, &bin_dir, version).map_err(|e| InstallError::install(version, e))?;
    actions::add_path(&cached, settings.path_file.as_deref())
        .map_err(|e| InstallError::install(version, e))?;

    Ok(cached)
}

fn install_deb(package: &Path) -> Result<()> {
    if which::which("gdebi").is_err() {
        tracing::info!("Installing gdebi-core to resolve package dependencies...");
        run_privileged("apt-get", &["install", "-y", "gdebi-core"])?;
    }

    let package = package.to_string_lossy();
    run_privileged("gdebi", &["--non-interactive", &*package])
}

/// Runs `program` through sudo when it is available, directly otherwise.
fn run_privileged(program: &str, args: &[&str]) -> Result<()> {
    run_command(privileged_command(program, args), program)
}

fn privileged_command(program: &str, args: &[&str]) -> Command {
    let mut command = if which::which("sudo").is_ok() {
        let mut command = Command::new("sudo");
        command.arg(program);
        command
    } else {
        Command::new(program)
    };
    command.args(args);
    command
}

fn run_command(mut command: Command, program: &str) -> Result<()> {
    tracing::debug!("Executing: {:?}", command);
    let output = command
        .output()
        .map_err(|e| anyhow!("Could not run {}: {}", program, e))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        tracing::debug!("{}", stdout.trim_end());
    }

    if !output.status.success() {
        return Err(anyhow!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(())
}
