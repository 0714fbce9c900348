use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::profile::{default_profiles_root, PLACES_FILE_NAME};

pub const PROFILES_ROOT_ENV: &str = "PLACES_SEARCH_PROFILES_ROOT";
const CONFIG_FILE_NAME: &str = "config.json";
const MAX_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profiles_root: PathBuf,
    pub places_file_name: String,
    pub busy_timeout_ms: u64,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_root: default_profiles_root(),
            places_file_name: PLACES_FILE_NAME.to_string(),
            busy_timeout_ms: 0,
            config_path: stable_app_data_dir().join(CONFIG_FILE_NAME),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Per-user directory for config and logs.
pub fn stable_app_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let base = std::env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(target_os = "macos")]
    let base = std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join("Library").join("Application Support"));

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let base = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share")));

    base.unwrap_or_else(std::env::temp_dir).join("places-search")
}

/// Loads config from `path` (or the default location). A missing file yields
/// defaults. The environment override is applied before validation.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    let mut cfg = if config_path.is_file() {
        let raw = std::fs::read_to_string(&config_path)?;
        parse(&config_path, &raw)?
    } else {
        Config::default()
    };
    cfg.config_path = config_path;

    if let Some(root) = std::env::var_os(PROFILES_ROOT_ENV) {
        if !root.is_empty() {
            cfg.profiles_root = PathBuf::from(root);
        }
    }

    validate(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let encoded =
        serde_json::to_string_pretty(cfg).map_err(|e| ConfigError::Parse(e.to_string()))?;
    std::fs::write(&cfg.config_path, encoded)?;
    Ok(())
}

fn parse(path: &Path, raw: &str) -> Result<Config, ConfigError> {
    let is_toml = path
        .extension()
        .and_then(|v| v.to_str())
        .is_some_and(|v| v.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
    } else {
        json5::from_str(raw).map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
    }
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    let file_name = cfg.places_file_name.trim();
    if file_name.is_empty() {
        return Err("places_file_name is required".into());
    }

    if file_name.contains('/') || file_name.contains('\\') {
        return Err("places_file_name must be a bare file name".into());
    }

    if cfg.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
        return Err(format!(
            "busy_timeout_ms must be at most {MAX_BUSY_TIMEOUT_MS}"
        ));
    }

    if cfg.profiles_root.as_os_str().is_empty() {
        return Err("profiles_root is required".into());
    }

    Ok(())
}
