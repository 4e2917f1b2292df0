//! GitHub release lookup
//!
//! Resolves "latest" to a concrete pandoc release tag. Lookup problems are
//! never fatal: the resolver falls back to [`FALLBACK_VERSION`].

use crate::config::{Settings, FALLBACK_VERSION};
use reqwest::{redirect, StatusCode};
use serde::Deserialize;
use thiserror::Error;

const USER_AGENT: &str = concat!("setup-pandoc/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 3;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GitHubRelease {
    /// Auto-incrementing, higher is newer
    pub id: u64,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub tag_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("release request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("release request to {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode release listing: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("no published release with a tag was found")]
    NoRelease,
}

/// True when the request asks for the newest release rather than a pin.
pub fn wants_latest(requested: &str) -> bool {
    let requested = requested.trim();
    requested.is_empty() || requested.eq_ignore_ascii_case("latest")
}

/// Returns the version to install. Pinned versions are returned unchanged,
/// without checking that such a release exists.
pub async fn resolve_version(requested: &str, settings: &Settings) -> String {
    if !wants_latest(requested) {
        return requested.trim().to_string();
    }

    match fetch_latest_version(settings).await {
        Ok(version) => {
            tracing::info!("Latest pandoc release is {}", version);
            version
        }
        Err(e) => {
            tracing::warn!(
                "Could not determine the latest pandoc release ({}), falling back to {}",
                e,
                FALLBACK_VERSION
            );
            FALLBACK_VERSION.to_string()
        }
    }
}

pub async fn fetch_latest_version(settings: &Settings) -> Result<String, ReleaseError> {
    let releases = fetch_releases(settings).await?;
    newest_tag(releases).ok_or(ReleaseError::NoRelease)
}

pub async fn fetch_releases(settings: &Settings) -> Result<Vec<GitHubRelease>, ReleaseError> {
    let url = settings.releases_url();
    tracing::debug!("Fetching GitHub release listing from: {}", url);

    let request_error = |source| ReleaseError::Request {
        url: url.clone(),
        source,
    };

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(request_error)?;

    let mut request = client
        .get(&url)
        .header("Accept", "application/vnd.github+json");

    if let Some(token) = &settings.token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(request_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ReleaseError::Status { url, status });
    }

    response.json().await.map_err(ReleaseError::Decode)
}

/// Tag of the newest non-draft release, by release id.
pub fn newest_tag(releases: Vec<GitHubRelease>) -> Option<String> {
    releases
        .into_iter()
        .filter(|release| !release.draft)
        .max_by_key(|release| release.id)
        .and_then(|release| release.tag_name)
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
}
