//! GitHub Actions workflow commands and PATH registration.

use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Escapes data for a workflow command so that newlines do not end it early.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub fn start_group(name: &str) {
    println!("::group::{}", escape_data(name));
}

pub fn end_group() {
    println!("::endgroup::");
}

pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

/// Marks the step as failed. The process exit code is set by the caller.
pub fn set_failed(message: &str) {
    let message = if message.trim().is_empty() {
        "Unknown error"
    } else {
        message
    };
    println!("::error::{}", escape_data(message));
}

/// Registers `dir` in the runner's PATH file so later steps of the job see it.
pub fn add_path(dir: &Path, path_file: Option<&Path>) -> Result<()> {
    if let Some(path_file) = path_file {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path_file)
            .with_context(|| format!("Could not open PATH file {}", path_file.display()))?;
        writeln!(file, "{}", dir.display())
            .with_context(|| format!("Could not write PATH file {}", path_file.display()))?;
    }

    tracing::info!("Added {} to the path", dir.display());
    Ok(())
}

/// `current` with `dir` in front.
fn prepended_path(dir: &Path, current: Option<OsString>) -> Result<OsString> {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(current) = current {
        paths.extend(env::split_paths(&current));
    }
    env::join_paths(paths).context("Could not extend PATH")
}

/// Puts `dir` first on PATH for the rest of this process.
///
/// Only call this from the main thread before any child processes are
/// spawned.
pub fn prepend_process_path(dir: &Path) -> Result<()> {
    let joined = prepended_path(dir, env::var_os("PATH"))?;
    env::set_var("PATH", joined);
    Ok(())
}
