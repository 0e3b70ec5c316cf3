use thiserror::Error;

use crate::process::{DEFAULT_CAPTURE_TIMEOUT, ProcessError, ProcessRunner};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry key path '{0}' (expected '<hive>:<path>/<value>')")]
    InvalidKeyPath(String),
    #[error("unknown registry hive '{0}'")]
    UnknownHive(String),
    #[error("registry value not found under '{key}'")]
    ValueNotFound { key: String },
    #[error("registry lookups are only available on Windows")]
    Unsupported,
    #[error("failed to query registry: {0}")]
    Execute(#[from] ProcessError),
}

pub trait RegistryLookup {
    fn read_values(&self, key_path: &str) -> Result<Vec<String>, RegistryError>;
}

pub struct SystemRegistryLookup<'a> {
    runner: &'a dyn ProcessRunner,
}

impl<'a> SystemRegistryLookup<'a> {
    pub fn new(runner: &'a dyn ProcessRunner) -> Self {
        Self { runner }
    }
}

impl RegistryLookup for SystemRegistryLookup<'_> {
    fn read_values(&self, key_path: &str) -> Result<Vec<String>, RegistryError> {
        if !cfg!(windows) {
            return Err(RegistryError::Unsupported);
        }

        let (key, value_name) = split_key_path(key_path)?;
        let output = self.runner.run_captured(
            "reg",
            &["query", &key, "/v", &value_name],
            DEFAULT_CAPTURE_TIMEOUT,
        )?;

        if !output.success() {
            return Err(RegistryError::ValueNotFound {
                key: key_path.to_string(),
            });
        }

        parse_reg_query_output(&output.stdout, &value_name).ok_or_else(|| {
            RegistryError::ValueNotFound {
                key: key_path.to_string(),
            }
        })
    }
}

pub(crate) fn split_key_path(key_path: &str) -> Result<(String, String), RegistryError> {
    let (hive, rest) = key_path
        .split_once(':')
        .ok_or_else(|| RegistryError::InvalidKeyPath(key_path.to_string()))?;

    let hive = match hive {
        "HKCR" => "HKCR",
        "HKCU" => "HKCU",
        "HKLM" => "HKLM",
        "HKU" => "HKU",
        "HKCC" => "HKCC",
        other => return Err(RegistryError::UnknownHive(other.to_string())),
    };

    let rest = rest.replace('/', "\\");
    let (path, value_name) = rest
        .rsplit_once('\\')
        .ok_or_else(|| RegistryError::InvalidKeyPath(key_path.to_string()))?;

    if path.is_empty() || value_name.is_empty() {
        return Err(RegistryError::InvalidKeyPath(key_path.to_string()));
    }

    Ok((format!("{hive}\\{path}"), value_name.to_string()))
}

pub(crate) fn parse_reg_query_output(stdout: &str, value_name: &str) -> Option<Vec<String>> {
    for line in stdout.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with(value_name) {
            continue;
        }

        let after_name = trimmed[value_name.len()..].trim_start();
        let Some(type_end) = after_name.find(char::is_whitespace) else {
            continue;
        };
        if !after_name.starts_with("REG_") {
            continue;
        }

        let data = after_name[type_end..].trim();
        if data.is_empty() {
            continue;
        }

        let values: Vec<String> = data
            .split(';')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect();

        if !values.is_empty() {
            return Some(values);
        }
    }

    None
}
