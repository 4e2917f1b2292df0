use thiserror::Error;

/// Fatal installation failures. Each carries the version that was being
/// installed so the run's failure message names it.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to download pandoc {version}: {cause:#}")]
    Download {
        version: String,
        cause: anyhow::Error,
    },

    #[error("Failed to extract pandoc {version}: {cause:#}")]
    Extract {
        version: String,
        cause: anyhow::Error,
    },

    #[error("Failed to install pandoc {version}: {cause:#}")]
    Install {
        version: String,
        cause: anyhow::Error,
    },

    #[error("pandoc {version} was installed but no pandoc executable is on PATH")]
    NotOnPath { version: String },
}

impl InstallError {
    pub fn download(version: &str, source: impl Into<anyhow::Error>) -> Self {
        InstallError::Download {
            version: version.to_string(),
            cause: source.into(),
        }
    }

    pub fn extract(version: &str, source: impl Into<anyhow::Error>) -> Self {
        InstallError::Extract {
            version: version.to_string(),
            cause: source.into(),
        }
    }

    pub fn install(version: &str, source: impl Into<anyhow::Error>) -> Self {
        InstallError::Install {
            version: version.to_string(),
            cause: source.into(),
        }
    }
}
