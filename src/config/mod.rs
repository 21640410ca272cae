// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[server]` - Forum base URL, session token and request timeout
//! - `[timing]` - Transition staging and search debounce
//! - `[notifications]` - Auto-dismiss duration per severity
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `FORUM_DESK_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use forum_desk::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::notifications::SeverityDurations;
use crate::ui::theming::ThemeMode;
use crate::ui::transition::Transition;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Forum server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the forum, endpoints are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session cookie (`token`) of an already logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Request timeout, clamped to the supported range.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS),
        )
    }
}

/// Transition and debounce timings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    #[serde(default = "default_entry_delay_ms")]
    pub entry_delay_ms: u64,

    #[serde(default = "default_exit_grace_ms")]
    pub exit_grace_ms: u64,

    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            entry_delay_ms: DEFAULT_ENTRY_DELAY_MS,
            exit_grace_ms: DEFAULT_EXIT_GRACE_MS,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            search_min_chars: DEFAULT_SEARCH_MIN_CHARS,
        }
    }
}

impl TimingConfig {
    /// Entry/exit staging shared by toasts and dialogs.
    #[must_use]
    pub fn transition(&self) -> Transition {
        Transition::new(
            Duration::from_millis(self.entry_delay_ms),
            Duration::from_millis(self.exit_grace_ms),
        )
    }

    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Auto-dismiss durations, in milliseconds. `0` keeps the toast until dismissed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationConfig {
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,

    #[serde(default = "default_info_ms")]
    pub info_ms: u64,

    #[serde(default = "default_warning_ms")]
    pub warning_ms: u64,

    #[serde(default = "default_error_ms")]
    pub error_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_ms: DEFAULT_SUCCESS_DURATION_MS,
            info_ms: DEFAULT_INFO_DURATION_MS,
            warning_ms: DEFAULT_WARNING_DURATION_MS,
            error_ms: DEFAULT_ERROR_DURATION_MS,
        }
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn durations(&self) -> SeverityDurations {
        SeverityDurations {
            success: Duration::from_millis(self.success_ms),
            info: Duration::from_millis(self.info_ms),
            warning: Duration::from_millis(self.warning_ms),
            error: Duration::from_millis(self.error_ms),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_entry_delay_ms() -> u64 {
    DEFAULT_ENTRY_DELAY_MS
}

fn default_exit_grace_ms() -> u64 {
    DEFAULT_EXIT_GRACE_MS
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_search_min_chars() -> usize {
    DEFAULT_SEARCH_MIN_CHARS
}

fn default_success_ms() -> u64 {
    DEFAULT_SUCCESS_DURATION_MS
}

fn default_info_ms() -> u64 {
    DEFAULT_INFO_DURATION_MS
}

fn default_warning_ms() -> u64 {
    DEFAULT_WARNING_DURATION_MS
}

fn default_error_ms() -> u64 {
    DEFAULT_ERROR_DURATION_MS
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<&'static str>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<&'static str>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!("ignoring {}: {err}", path.display());
                    return (Config::default(), Some("notification-config-load-error"));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
