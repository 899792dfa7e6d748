//! Configuration loading and data folder resolution
//!
//! Bootstrap configuration is a small TOML file. It only locates the static
//! dataset files and sets the HTTP port and log level; nothing here changes
//! while a process is running.
//!
//! # Sources Priority
//!
//! 1. Command-line arguments (handled by the binaries, passed in here)
//! 2. Environment variables (`AITRIAL_CONFIG`, `AITRIAL_DATA_FOLDER`)
//! 3. TOML configuration file
//! 4. OS-dependent compiled defaults

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "AITRIAL_CONFIG";

/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV_VAR: &str = "AITRIAL_DATA_FOLDER";

/// Default case dataset file name inside the data folder
pub const DEFAULT_CASES_FILE: &str = "ai_on_trial_data_static_geo.json";

/// Default boundary feature collection file name inside the data folder
pub const DEFAULT_BOUNDARIES_FILE: &str = "countries.geojson";

/// Default enriched choropleth artifact file name inside the data folder
pub const DEFAULT_CHOROPLETH_FILE: &str = "choropleth_ai_cases.geojson";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// Folder holding the dataset files (optional)
    #[serde(default)]
    pub data_folder: Option<PathBuf>,

    /// Explicit case dataset path, overrides `data_folder` join
    #[serde(default)]
    pub cases_file: Option<PathBuf>,

    /// Explicit boundary collection path, overrides `data_folder` join
    #[serde(default)]
    pub boundaries_file: Option<PathBuf>,

    /// Explicit choropleth artifact path, overrides `data_folder` join
    #[serde(default)]
    pub choropleth_file: Option<PathBuf>,

    /// HTTP server port for the portal
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            data_folder: None,
            cases_file: None,
            boundaries_file: None,
            choropleth_file: None,
            port: default_port(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5730
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolved locations of the three dataset files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub cases: PathBuf,
    pub boundaries: PathBuf,
    pub choropleth: PathBuf,
}

impl DataPaths {
    /// Join default file names onto `data_folder` unless the config names a file
    pub fn resolve(data_folder: &Path, config: &TomlConfig) -> Self {
        let pick = |explicit: &Option<PathBuf>, default_name: &str| {
            explicit
                .clone()
                .unwrap_or_else(|| data_folder.join(default_name))
        };

        Self {
            cases: pick(&config.cases_file, DEFAULT_CASES_FILE),
            boundaries: pick(&config.boundaries_file, DEFAULT_BOUNDARIES_FILE),
            choropleth: pick(&config.choropleth_file, DEFAULT_CHOROPLETH_FILE),
        }
    }
}

/// Parse a TOML config file
///
/// A present but unparseable file is an error; callers decide how to treat
/// a missing one.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Load the bootstrap config, degrading to defaults when no file exists
///
/// Lookup order: `cli_arg`, then `AITRIAL_CONFIG`, then the platform config
/// locations. An explicitly named file that does not exist is an error.
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let explicit = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from));

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        info!("Loading config from {}", path.display());
        return load_toml_config(&path);
    }

    match find_config_file() {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_toml_config(&path)
        }
        None => {
            warn!("No config file found, using compiled defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Platform config file locations, first existing one wins
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("aitrial").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/aitrial/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Data folder resolution:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config value
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATA_FOLDER_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(path) = &config.data_folder {
        return path.clone();
    }

    default_data_folder()
}

/// OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("aitrial"))
        .unwrap_or_else(|| PathBuf::from("./aitrial_data"))
}
