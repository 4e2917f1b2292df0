use std::fmt;
use std::path::PathBuf;

/// Host operating systems pandoc publishes release artifacts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }

    /// Root under which runner directories live when the runner does not
    /// provide them.
    pub fn base_location(self) -> PathBuf {
        match self {
            Platform::Windows => std::env::var_os("USERPROFILE")
                .map(PathBuf::from)
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("C:\\")),
            Platform::Mac => PathBuf::from("/Users"),
            Platform::Linux => PathBuf::from("/home"),
        }
    }

    pub fn executable_name(self, tool_name: &str) -> String {
        match self {
            Platform::Windows => format!("{}.exe", tool_name),
            Platform::Mac | Platform::Linux => tool_name.to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
        };
        f.write_str(name)
    }
}

/// Architecture label used for tool cache directories, following the
/// runner's own naming.
pub fn cache_arch() -> String {
    match std::env::consts::ARCH {
        "x86_64" => "x64".to_string(),
        "aarch64" => "arm64".to_string(),
        "x86" => "x86".to_string(),
        other => other.to_string(),
    }
}
