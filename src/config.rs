//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/argresolve/argresolve.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ARGRESOLVE_*` prefix
//! 5. CLI overrides (applied by the caller)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::JoinOptions;

/// Raw join options for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawJoinOptions {
    pub prefix: Option<String>,
    pub joiner: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub env_prefix: Option<String>,
    pub undefined_sentinel: Option<String>,
    pub legacy_env_lookup: Option<bool>,
    pub join: RawJoinOptions,
}

/// Unified configuration for argresolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Prefix of the snake-cased env variable (default: DETOX)
    pub env_prefix: String,
    /// Env value treated as unset (default: "undefined")
    pub undefined_sentinel: String,
    /// Also consult the legacy camelCase env variable (default: true)
    pub legacy_env_lookup: bool,
    /// Defaults for joining key-values into an argument string
    pub join: JoinOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_prefix: "DETOX".into(),
            undefined_sentinel: "undefined".into(),
            legacy_env_lookup: true,
            join: JoinOptions::default(),
        }
    }
}

/// Get the XDG config directory for argresolve.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "argresolve").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("argresolve.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            env_prefix: overlay
                .env_prefix
                .clone()
                .unwrap_or_else(|| self.env_prefix.clone()),
            undefined_sentinel: overlay
                .undefined_sentinel
                .clone()
                .unwrap_or_else(|| self.undefined_sentinel.clone()),
            legacy_env_lookup: overlay.legacy_env_lookup.unwrap_or(self.legacy_env_lookup),
            join: JoinOptions {
                prefix: overlay
                    .join
                    .prefix
                    .clone()
                    .unwrap_or_else(|| self.join.prefix.clone()),
                joiner: overlay
                    .join
                    .joiner
                    .clone()
                    .unwrap_or_else(|| self.join.joiner.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; it must exist when given
    pub fn load(explicit: Option<&Path>) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply ARGRESOLVE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ARGRESOLVE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("env_prefix") {
            settings.env_prefix = val;
        }
        if let Ok(val) = config.get_string("undefined_sentinel") {
            settings.undefined_sentinel = val;
        }
        if let Ok(val) = config.get_bool("legacy_env_lookup") {
            settings.legacy_env_lookup = val;
        }
        if let Ok(val) = config.get_string("join.prefix") {
            settings.join.prefix = val;
        }
        if let Ok(val) = config.get_string("join.joiner") {
            settings.join.joiner = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# argresolve configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/argresolve/argresolve.toml
#   Explicit: --config <FILE>
#   Env:      ARGRESOLVE_* environment variables (ARGRESOLVE_JOIN__PREFIX for [join].prefix)

# Prefix of the snake-cased env variable: key "foo-bar" reads DETOX_FOO_BAR
# env_prefix = "DETOX"

# Env value treated as unset
# undefined_sentinel = "undefined"

# Also read the legacy camelCase env variable: key "foo-bar" reads fooBar
# legacy_env_lookup = true

[join]
# Prepended to keys not starting with a dash
# prefix = "--"

# Placed between key and value
# joiner = " "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_defaults_then_uses_detox_prefix() {
        let settings = Settings::default();
        assert_eq!(settings.env_prefix, "DETOX");
        assert_eq!(settings.undefined_sentinel, "undefined");
        assert!(settings.legacy_env_lookup);
        assert_eq!(settings.join, JoinOptions::default());
    }

    #[test]
    fn test_merge_with_overlay_wins_when_specified() {
        let base = Settings::default();
        let overlay = RawSettings {
            env_prefix: Some("E2E".into()),
            undefined_sentinel: None,
            legacy_env_lookup: Some(false),
            join: RawJoinOptions {
                prefix: None,
                joiner: Some("=".into()),
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.env_prefix, "E2E");
        assert_eq!(result.undefined_sentinel, "undefined");
        assert!(!result.legacy_env_lookup);
        assert_eq!(result.join.prefix, "--");
        assert_eq!(result.join.joiner, "=");
    }

    #[test]
    fn test_merge_with_empty_overlay_keeps_base() {
        let base = Settings {
            env_prefix: "CUSTOM".into(),
            ..Settings::default()
        };
        assert_eq!(base.merge_with(&RawSettings::default()), base);
    }

    #[test]
    fn test_template_parses_as_settings() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("template parses");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_to_toml_round_trips_join_section() {
        let toml = Settings::default().to_toml().expect("serialize");
        assert!(toml.contains("[join]"));
        assert!(toml.contains(r#"env_prefix = "DETOX""#));
    }
}
