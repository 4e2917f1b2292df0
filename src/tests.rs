use crate::cli::Cli;
use crate::config::{Packaging, Settings, DEFAULT_API_URL, DEFAULT_DOWNLOAD_URL, FALLBACK_VERSION};
use crate::platform::Platform;
use clap::Parser;
use tempfile::TempDir;

fn cli_with_dirs(temp: &TempDir, extra: &[&str]) -> Cli {
    let temp_dir = temp.path().join("runner-temp");
    let cache_dir = temp.path().join("tool-cache");
    let mut args = vec![
        "setup-pandoc".to_string(),
        "--temp-dir".to_string(),
        temp_dir.to_string_lossy().to_string(),
        "--tool-cache".to_string(),
        cache_dir.to_string_lossy().to_string(),
    ];
    // Pin endpoints so ambient GITHUB_API_URL does not leak in, unless the
    // test sets them itself
    for (flag, default) in [
        ("--api-url", DEFAULT_API_URL),
        ("--download-url", DEFAULT_DOWNLOAD_URL),
    ] {
        if !extra.contains(&flag) {
            args.push(flag.to_string());
            args.push(default.to_string());
        }
    }
    args.extend(extra.iter().map(|s| s.to_string()));
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_packaging_parse() {
    assert_eq!("".parse::<Packaging>().unwrap(), Packaging::Archive);
    assert_eq!("Archive".parse::<Packaging>().unwrap(), Packaging::Archive);
    assert_eq!("installer".parse::<Packaging>().unwrap(), Packaging::Installer);
    assert_eq!("package".parse::<Packaging>().unwrap(), Packaging::Installer);
    assert!("rpm".parse::<Packaging>().is_err());
}

#[test]
fn test_settings_create_runner_dirs() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_dirs(&temp, &[]);

    let settings = Settings::from_cli(&cli).unwrap();

    assert_eq!(settings.platform, Platform::current());
    assert!(settings.temp_dir.is_dir());
    assert!(settings.tool_cache_dir.is_dir());
    assert_eq!(
        settings.releases_url(),
        "https://api.github.com/repos/jgm/pandoc/releases"
    );
}

#[test]
fn test_settings_trim_trailing_slash_from_urls() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_dirs(
        &temp,
        &["--download-url", "https://mirror.example.test/pandoc/"],
    );

    let settings = Settings::from_cli(&cli).unwrap();
    assert_eq!(settings.download_base_url, "https://mirror.example.test/pandoc");
    assert_eq!(settings.api_base_url, DEFAULT_API_URL);
}

#[test]
fn test_settings_reject_invalid_url() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_dirs(&temp, &["--api-url", "not a url"]);
    let err = Settings::from_cli(&cli).unwrap_err();
    assert!(err.to_string().contains("Invalid URL 'not a url'"));
}

#[test]
fn test_settings_keep_explicit_api_url() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_dirs(&temp, &["--api-url", "https://ghe.example.test/api/v3//"]);
    let settings = Settings::from_cli(&cli).unwrap();
    assert_eq!(settings.api_base_url, "https://ghe.example.test/api/v3");
    assert_eq!(
        settings.releases_url(),
        "https://ghe.example.test/api/v3/repos/jgm/pandoc/releases"
    );
    assert_eq!(settings.download_base_url, DEFAULT_DOWNLOAD_URL);
}

#[test]
fn test_blank_token_is_ignored() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_dirs(&temp, &["--token", "  "]);
    let settings = Settings::from_cli(&cli).unwrap();
    // Falls through to GITHUB_TOKEN, which may be set in CI
    assert_ne!(settings.token.as_deref(), Some("  "));
    assert_ne!(settings.token.as_deref(), Some(""));
}

#[test]
fn test_installer_packaging_kept_off_windows() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_dirs(&temp, &["--packaging", "installer"]);
    let settings = Settings::from_cli(&cli).unwrap();

    let expected = if cfg!(windows) {
        Packaging::Archive
    } else {
        Packaging::Installer
    };
    assert_eq!(settings.packaging, expected);
}

#[test]
fn test_fallback_version_is_dotted_numeric() {
    assert!(FALLBACK_VERSION
        .split('.')
        .all(|segment| segment.parse::<u64>().is_ok()));
}
