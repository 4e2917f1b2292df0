//! Release artifact names and URLs.
//!
//! Upstream changed its packaging several times, so file names and the
//! layout inside archives are looked up in version-threshold tables. New
//! upstream changes should only need a new row.

use crate::config::Packaging;
use crate::platform::Platform;
use crate::version::{select, Comparison, VersionRule};

/// Where to download a release artifact from, and what it is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDescriptor {
    pub url: String,
    pub file_name: String,
}

/// `{version}` in a template is replaced with the (encoded) version.
const VERSION_PLACEHOLDER: &str = "{version}";

// Starting with 3.1.2, mac artifacts carry the architecture.
const MAC_ZIP_NAMES: &[VersionRule<&str>] = &[VersionRule {
    op: Comparison::Greater,
    bound: "3.1.1",
    value: "pandoc-{version}-x86_64-macOS.zip",
}];
const MAC_ZIP_DEFAULT: &str = "pandoc-{version}-macOS.zip";

const MAC_PKG_NAMES: &[VersionRule<&str>] = &[VersionRule {
    op: Comparison::Greater,
    bound: "3.1.1",
    value: "pandoc-{version}-x86_64-macOS.pkg",
}];
const MAC_PKG_DEFAULT: &str = "pandoc-{version}-macOS.pkg";

const MAC_BIN_DIRS: &[VersionRule<&str>] = &[VersionRule {
    op: Comparison::Greater,
    bound: "3.1.1",
    value: "pandoc-{version}-x86_64/bin",
}];
const MAC_BIN_DIR_DEFAULT: &str = "pandoc-{version}/bin";

// 2.9.1 was zipped without a top level directory.
const WINDOWS_BIN_DIRS: &[VersionRule<&str>] = &[
    VersionRule {
        op: Comparison::GreaterOrEqual,
        bound: "2.9.2",
        value: "pandoc-{version}",
    },
    VersionRule {
        op: Comparison::Equal,
        bound: "2.9.1",
        value: "",
    },
];
const WINDOWS_BIN_DIR_DEFAULT: &str = "pandoc-{version}-windows-x86_64";

const LINUX_TARBALL_NAME: &str = "pandoc-{version}-linux-amd64.tar.gz";
const LINUX_DEB_NAME: &str = "pandoc-{version}-1-amd64.deb";
const LINUX_BIN_DIR: &str = "pandoc-{version}/bin";

const WINDOWS_ZIP_NAME: &str = "pandoc-{version}-windows-x86_64.zip";

fn render(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

pub fn file_name(platform: Platform, packaging: Packaging, version: &str) -> String {
    let encoded = urlencoding::encode(version);
    let template = match (platform, packaging) {
        (Platform::Linux, Packaging::Archive) => LINUX_TARBALL_NAME,
        (Platform::Linux, Packaging::Installer) => LINUX_DEB_NAME,
        // Windows releases are only consumed as zips
        (Platform::Windows, _) => WINDOWS_ZIP_NAME,
        (Platform::Mac, Packaging::Archive) => select(MAC_ZIP_NAMES, version, MAC_ZIP_DEFAULT),
        (Platform::Mac, Packaging::Installer) => select(MAC_PKG_NAMES, version, MAC_PKG_DEFAULT),
    };
    render(template, &encoded)
}

/// Builds the download location of a release artifact. Pure: the same
/// inputs always give the same descriptor.
pub fn build_descriptor(
    base_url: &str,
    platform: Platform,
    packaging: Packaging,
    version: &str,
) -> DownloadDescriptor {
    let file_name = file_name(platform, packaging, version);
    let url = format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(version),
        file_name
    );
    DownloadDescriptor { url, file_name }
}

/// Directory holding the executable, relative to the archive's extraction
/// root. Empty means the root itself.
pub fn archive_bin_dir(platform: Platform, version: &str) -> String {
    let template = match platform {
        Platform::Windows => select(WINDOWS_BIN_DIRS, version, WINDOWS_BIN_DIR_DEFAULT),
        Platform::Mac => select(MAC_BIN_DIRS, version, MAC_BIN_DIR_DEFAULT),
        Platform::Linux => LINUX_BIN_DIR,
    };
    render(template, version)
}
