use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runner variables that would leak the host's CI setup into a test run.
#[allow(dead_code)]
const RUNNER_VARS: &[&str] = &[
    "INPUT_PANDOC-VERSION",
    "INPUT_TOKEN",
    "INPUT_PACKAGING",
    "GITHUB_TOKEN",
    "GITHUB_PATH",
    "GITHUB_API_URL",
    "RUNNER_TEMP",
    "RUNNER_TOOL_CACHE",
    "RUNNER_DEBUG",
    "RUST_LOG",
];

// Not every test binary uses every helper.
#[allow(dead_code)]
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub runner_temp: PathBuf,
    pub tool_cache: PathBuf,
    pub path_file: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let runner_temp = temp_dir.path().join("runner-temp");
        let tool_cache = temp_dir.path().join("tool-cache");
        let path_file = temp_dir.path().join("github_path");

        let bin_path = PathBuf::from(env!("CARGO_BIN_EXE_setup-pandoc"));

        Self {
            _temp_dir: temp_dir,
            runner_temp,
            tool_cache,
            path_file,
            bin_path,
        }
    }

    /// Command with isolated runner directories. Network endpoints point at
    /// a closed local port unless overridden.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        for var in RUNNER_VARS {
            cmd.env_remove(var);
        }
        cmd.env("RUNNER_TEMP", &self.runner_temp);
        cmd.env("RUNNER_TOOL_CACHE", &self.tool_cache);
        cmd.env("GITHUB_PATH", &self.path_file);
        cmd.env("GITHUB_API_URL", "http://127.0.0.1:9");
        cmd.env("SETUP_PANDOC_DOWNLOAD_URL", "http://127.0.0.1:9");
        cmd
    }

    pub fn registered_paths(&self) -> Vec<String> {
        fs::read_to_string(&self.path_file)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Places a fake pandoc that reports `version` into a completed tool
    /// cache entry.
    #[cfg(unix)]
    pub fn seed_cache(&self, version: &str) -> PathBuf {
        let arch_dir = self.tool_cache.join("pandoc").join(version).join(cache_arch());
        fs::create_dir_all(&arch_dir).expect("Failed to create cache entry");
        write_fake_pandoc(&arch_dir.join("pandoc"), version);
        fs::write(
            self.tool_cache
                .join("pandoc")
                .join(version)
                .join(format!("{}.complete", cache_arch())),
            "",
        )
        .expect("Failed to write cache marker");
        arch_dir
    }
}

#[allow(dead_code)]
pub fn cache_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        other => other,
    }
}

#[allow(dead_code)]
pub fn fake_pandoc_script(version: &str) -> String {
    format!("#!/bin/sh\necho \"pandoc {}\"\necho \"Features: +server +lua\"\n", version)
}

#[allow(dead_code)]
#[cfg(unix)]
pub fn write_fake_pandoc(path: &Path, version: &str) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, fake_pandoc_script(version)).expect("Failed to write fake pandoc");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake pandoc executable");
}

/// A release tarball laid out like upstream's linux archive.
#[allow(dead_code)]
pub fn linux_tarball(version: &str) -> Vec<u8> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let script = fake_pandoc_script(version);
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mut header = tar::Header::new_gnu();
    header.set_size(script.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();
    builder
        .append_data(
            &mut header,
            format!("pandoc-{}/bin/pandoc", version),
            script.as_bytes(),
        )
        .expect("Failed to build tarball");
    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .expect("Failed to finish tarball")
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        if self.status.success() {
            panic!(
                "Command unexpectedly succeeded\nstdout: {}\nstderr: {}",
                self.stdout, self.stderr
            );
        }
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }
}
