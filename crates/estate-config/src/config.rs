//! Configuration types and loading.
//!
//! The main entry point is [`EstateConfig`], the contents of
//! `.estate/config.yaml`. Values are layered with figment: built-in defaults,
//! then the YAML file, then `ESTATE_*` environment variables
//! (`ESTATE_DATA_FILE`, `ESTATE_DEFAULT_LIMIT`, `ESTATE_PROMPT`, `ESTATE_COLOR`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File name of the configuration inside `.estate/`.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix of the environment variables that override file values.
pub const ENV_PREFIX: &str = "ESTATE_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be encoded as YAML for saving. Bad YAML
    /// on load is reported as [`ConfigError::Extract`].
    #[error("failed to encode config as YAML: {0}")]
    Encode(#[from] serde_yaml::Error),

    /// A layer (file or environment) held a value of the wrong shape.
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    /// The `.estate/` directory was not found.
    #[error("no .estate directory found (run 'eb init' first)")]
    EstateDirNotFound,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Color choice
// ---------------------------------------------------------------------------

/// Whether terminal output is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when the terminal supports it.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }

    /// `None` means "decide from the terminal".
    pub fn forced(&self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(ConfigError::InvalidValue {
                key: "color".into(),
                reason: format!("'{other}' is not one of auto, always, never"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The estatebook configuration, corresponding to `.estate/config.yaml`.
///
/// Every field has a default, so a partial or empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EstateConfig {
    /// Data file; relative paths are resolved against `.estate/`.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Page size for `filterc`/`filterp` when no `limit/` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_limit: Option<usize>,

    /// Interactive shell prompt.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    #[serde(default)]
    pub color: ColorChoice,
}

impl Default for EstateConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_limit: None,
            prompt: default_prompt(),
            color: ColorChoice::default(),
        }
    }
}

fn default_data_file() -> String {
    "estatebook.json".to_string()
}

fn default_prompt() -> String {
    "eb> ".to_string()
}

impl EstateConfig {
    /// Keys accepted by [`EstateConfig::set`], in display order.
    pub const KEYS: &[&str] = &["data-file", "default-limit", "prompt", "color"];

    /// Absolute location of the data file for a project rooted at `estate_dir`.
    pub fn data_path(&self, estate_dir: &Path) -> PathBuf {
        let path = Path::new(&self.data_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            estate_dir.join(path)
        }
    }

    /// Rejects values the types alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "data-file".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.default_limit == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "default-limit".into(),
                reason: "must be a positive whole number".into(),
            });
        }
        Ok(())
    }

    /// Returns the value of `key` as text, or `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "default-limit" => Some(
                self.default_limit
                    .map(|n| n.to_string())
                    .unwrap_or_default(),
            ),
            "prompt" => Some(self.prompt.clone()),
            "color" => Some(self.color.to_string()),
            _ => None,
        }
    }

    /// Every key with its current value.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }

    /// Sets `key` from its text form. An empty `default-limit` unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => self.data_file = value.trim().to_string(),
            "default-limit" => {
                let value = value.trim();
                self.default_limit = if value.is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.into(),
                        reason: format!("'{value}' is not a whole number"),
                    })?)
                };
            }
            "prompt" => self.prompt = value.to_string(),
            "color" => self.color = value.parse()?,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    reason: format!("unknown key (expected one of: {})", Self::KEYS.join(", ")),
                });
            }
        }
        self.validate()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

fn file_figment(estate_dir: &Path) -> Figment {
    Figment::from(Serialized::defaults(EstateConfig::default()))
        .merge(Yaml::file(estate_dir.join(CONFIG_FILE_NAME)))
}

fn extract(figment: Figment) -> Result<EstateConfig> {
    let config: EstateConfig = figment.extract().map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// Loads the effective configuration: defaults, then `config.yaml` inside
/// `estate_dir`, then `ESTATE_*` environment variables.
///
/// A missing file yields the defaults (still subject to the environment).
///
/// # Errors
///
/// Returns [`ConfigError::Extract`] if a layer holds a malformed value, or
/// [`ConfigError::InvalidValue`] if the merged result is out of range.
pub fn load_config(estate_dir: &Path) -> Result<EstateConfig> {
    let figment = file_figment(estate_dir).merge(
        Env::prefixed(ENV_PREFIX)
            .ignore(&["DIR"])
            .map(|key| key.as_str().replace('_', "-").into()),
    );
    let config = extract(figment)?;
    debug!(?estate_dir, ?config, "loaded configuration");
    Ok(config)
}

/// Loads only defaults and `config.yaml`, ignoring the environment.
///
/// Used before [`save_config`] so environment overrides are not written back.
pub fn load_file_config(estate_dir: &Path) -> Result<EstateConfig> {
    extract(file_figment(estate_dir))
}

/// Saves configuration to `config.yaml` inside `estate_dir`, creating the
/// directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] on I/O failure or [`ConfigError::Encode`]
/// if serialization fails.
pub fn save_config(estate_dir: &Path, config: &EstateConfig) -> Result<()> {
    std::fs::create_dir_all(estate_dir)?;
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(estate_dir.join(CONFIG_FILE_NAME), yaml)?;
    debug!(?estate_dir, "saved configuration");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = EstateConfig::default();
        assert_eq!(cfg.data_file, "estatebook.json");
        assert_eq!(cfg.prompt, "eb> ");
        assert_eq!(cfg.color, ColorChoice::Auto);
        assert!(cfg.default_limit.is_none());
    }

    #[test]
    fn test_load_missing_config_returns_default() {
        Jail::expect_with(|jail| {
            let cfg = load_config(jail.directory()).unwrap();
            assert_eq!(cfg, EstateConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "default-limit: 5\ncolor: never\n")?;
            let cfg = load_config(jail.directory()).unwrap();
            assert_eq!(cfg.default_limit, Some(5));
            assert_eq!(cfg.color, ColorChoice::Never);
            assert_eq!(cfg.prompt, "eb> ");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "data-file: from-file.json\nprompt: 'file> '\n")?;
            jail.set_env("ESTATE_DATA_FILE", "from-env.json");
            jail.set_env("ESTATE_DEFAULT_LIMIT", "3");
            jail.set_env("ESTATE_DIR", "/somewhere/else");

            let cfg = load_config(jail.directory()).unwrap();
            assert_eq!(cfg.data_file, "from-env.json");
            assert_eq!(cfg.default_limit, Some(3));
            assert_eq!(cfg.prompt, "file> ");

            let file_only = load_file_config(jail.directory()).unwrap();
            assert_eq!(file_only.data_file, "from-file.json");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "color: purple\n")?;
            assert!(matches!(
                load_config(jail.directory()),
                Err(ConfigError::Extract(_))
            ));

            jail.create_file("config.yaml", "default-limit: 0\n")?;
            assert!(matches!(
                load_config(jail.directory()),
                Err(ConfigError::InvalidValue { .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn test_error_variants_match_the_failure() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "default-limit: [unclosed\n")?;
            assert!(matches!(
                load_config(jail.directory()),
                Err(ConfigError::Extract(_))
            ));

            jail.create_file("not-a-dir", "")?;
            let err = save_config(&jail.directory().join("not-a-dir"), &EstateConfig::default())
                .unwrap_err();
            assert!(matches!(err, ConfigError::Io(_)), "{err}");
            assert!(err.to_string().starts_with("failed to access config file"));
            Ok(())
        });
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let estate_dir = dir.path().join(".estate");

        let mut cfg = EstateConfig::default();
        cfg.set("default-limit", "20").unwrap();
        cfg.set("prompt", "> ").unwrap();
        save_config(&estate_dir, &cfg).unwrap();

        let loaded = load_file_config(&estate_dir).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_set_and_get() {
        let mut cfg = EstateConfig::default();
        cfg.set("color", "ALWAYS").unwrap();
        assert_eq!(cfg.get("color").as_deref(), Some("always"));

        cfg.set("default-limit", "").unwrap();
        assert_eq!(cfg.get("default-limit").as_deref(), Some(""));

        assert!(cfg.set("default-limit", "many").is_err());
        assert!(cfg.set("default-limit", "0").is_err());
        assert!(cfg.set("nope", "1").is_err());
        assert_eq!(cfg.get("nope"), None);
        assert_eq!(cfg.entries().len(), EstateConfig::KEYS.len());
    }

    #[test]
    fn test_data_path_resolution() {
        let cfg = EstateConfig::default();
        assert_eq!(
            cfg.data_path(Path::new("/proj/.estate")),
            PathBuf::from("/proj/.estate/estatebook.json")
        );
        let cfg = EstateConfig {
            data_file: "/var/data/book.json".into(),
            ..Default::default()
        };
        assert_eq!(
            cfg.data_path(Path::new("/proj/.estate")),
            PathBuf::from("/var/data/book.json")
        );
    }
}
