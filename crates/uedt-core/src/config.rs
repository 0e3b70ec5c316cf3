use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "uedt.toml";

pub const BUILD_CONFIGURATIONS: &[&str] = &["Development", "Test", "Shipping", "Release"];
pub const COMPILE_CONFIGURATIONS: &[&str] = &["Development", "Shipping"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UedtConfig {
    pub build: BuildSettings,
    pub compile: CompileSettings,
    pub maps: Vec<String>,
    pub perforce: Option<PerforceConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildSettings {
    pub staging_dir: PathBuf,
    pub configuration: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("E:/_Builds"),
            configuration: "Development".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CompileSettings {
    pub configuration: String,
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            configuration: "Shipping".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PerforceConfig {
    pub server_address: String,
    pub server_port: u16,
    pub user: String,
    pub ticket: String,
    pub workspace: String,
    pub depot_path: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {message}")]
    Validation { message: String },
}

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

pub fn load_config(path: &Path) -> Result<UedtConfig, ConfigError> {
    if !path.exists() {
        return Ok(UedtConfig::default());
    }

    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: UedtConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(&parsed)?;
    Ok(parsed)
}

pub fn validate_config(config: &UedtConfig) -> Result<(), ConfigError> {
    validate_build_configuration(&config.build.configuration)?;

    if !COMPILE_CONFIGURATIONS.contains(&config.compile.configuration.as_str()) {
        return Err(validation_error(format!(
            "unknown compile configuration '{}' (expected one of {})",
            config.compile.configuration,
            COMPILE_CONFIGURATIONS.join(", ")
        )));
    }

    if config.build.staging_dir.as_os_str().is_empty() {
        return Err(validation_error(
            "build staging_dir must not be empty".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_build_configuration(configuration: &str) -> Result<(), ConfigError> {
    if BUILD_CONFIGURATIONS.contains(&configuration) {
        return Ok(());
    }

    Err(validation_error(format!(
        "unknown build configuration '{configuration}' (expected one of {})",
        BUILD_CONFIGURATIONS.join(", ")
    )))
}

fn validation_error(message: String) -> ConfigError {
    ConfigError::Validation { message }
}
