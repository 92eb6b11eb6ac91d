//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pdfchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ThemeMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PdfChatConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub sync_on_startup: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub theme: Option<ThemeMode>,
    pub notice_secs: Option<u64>,
    pub start_dir: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Uploads block until the backend has embedded every page, so be generous.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_NOTICE_SECS: u64 = 6;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub theme: ThemeMode,
    pub notice_duration: Duration,
    pub start_dir: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub sync_on_startup: bool,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub theme: Option<ThemeMode>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.pdfchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pdfchat").join("config.toml"))
}

/// Load config from `~/.pdfchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PdfChatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PdfChatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PdfChatConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`], for an explicit path.
pub fn load_config_from(path: &Path) -> Result<PdfChatConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(PdfChatConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PdfChatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# pdfchat configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "error", "warn", "info", "debug", "trace", "off"
# sync_on_startup = false            # load the backend's document list at launch

# [backend]
# base_url = "http://localhost:8000" # Or set PDFCHAT_BASE_URL, or pass --base-url
# request_timeout_secs = 300

# [ui]
# theme = "light"                    # "light" or "dark"
# notice_secs = 6                    # how long upload errors stay on screen
# start_dir = "/home/me/papers"      # where the file picker opens
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &PdfChatConfig, cli: CliOverrides<'_>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PDFCHAT_BASE_URL").ok())
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Theme: CLI → config → default
    let theme = cli.theme.or(config.ui.theme).unwrap_or_default();

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|s| match s.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log_level {:?}, using debug", s);
                None
            }
        })
        .unwrap_or(LevelFilter::Debug);

    ResolvedConfig {
        base_url,
        request_timeout: Duration::from_secs(
            config
                .backend
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        theme,
        notice_duration: Duration::from_secs(
            config.ui.notice_secs.unwrap_or(DEFAULT_NOTICE_SECS),
        ),
        start_dir: config.ui.start_dir.clone(),
        log_level,
        sync_on_startup: config.general.sync_on_startup.unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = PdfChatConfig::default();
        assert!(config.backend.base_url.is_none());
        assert!(config.ui.theme.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = PdfChatConfig::default();
        let resolved = resolve(
            &config,
            CliOverrides {
                base_url: Some(DEFAULT_BASE_URL),
                theme: None,
            },
        );
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.theme, ThemeMode::Light);
        assert_eq!(resolved.notice_duration, Duration::from_secs(6));
        assert_eq!(
            resolved.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert!(!resolved.sync_on_startup);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = PdfChatConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
                sync_on_startup: Some(true),
            },
            ui: UiConfig {
                theme: Some(ThemeMode::Dark),
                notice_secs: Some(10),
                start_dir: Some(PathBuf::from("/tmp")),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.theme, ThemeMode::Dark);
        assert_eq!(resolved.notice_duration, Duration::from_secs(10));
        assert_eq!(resolved.start_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert!(resolved.sync_on_startup);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = PdfChatConfig {
            backend: BackendConfig {
                base_url: Some("http://config-host:9000".to_string()),
                request_timeout_secs: None,
            },
            ui: UiConfig {
                theme: Some(ThemeMode::Light),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(
            &config,
            CliOverrides {
                base_url: Some("http://cli-host:1234"),
                theme: Some(ThemeMode::Dark),
            },
        );
        assert_eq!(resolved.base_url, "http://cli-host:1234");
        assert_eq!(resolved.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = PdfChatConfig {
            general: GeneralConfig {
                log_level: Some("chatty".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_level = "info"
sync_on_startup = true

[backend]
base_url = "http://192.168.1.100:8000"
request_timeout_secs = 60

[ui]
theme = "dark"
notice_secs = 3
"#;
        let config: PdfChatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://192.168.1.100:8000")
        );
        assert_eq!(config.backend.request_timeout_secs, Some(60));
        assert_eq!(config.ui.theme, Some(ThemeMode::Dark));
        assert_eq!(config.ui.notice_secs, Some(3));
        assert_eq!(config.general.sync_on_startup, Some(true));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[ui]
theme = "dark"
"#;
        let config: PdfChatConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ui.theme, Some(ThemeMode::Dark));
        assert!(config.backend.base_url.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.backend.base_url.is_none());

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# base_url"));
        // Everything is commented out, so it parses to defaults
        let reparsed: PdfChatConfig = toml::from_str(&written).unwrap();
        assert!(reparsed.ui.theme.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ui\ntheme = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
