use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Install prefix of the Python environment that runs the backend.
pub const PREFIX_VAR: &str = "CONDA_PREFIX";
pub const INTERPRETER: &str = "python.exe";
/// Backend entry point, relative to the shell's working directory.
pub const BACKEND_ENTRY: &str = "flask_app/main.py";
pub const ENDPOINT: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set; it must point at the Python environment that runs the backend")]
    MissingPrefix(&'static str),
    #[error("cannot resolve the working directory: {0}")]
    WorkingDir(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub interpreter: PathBuf,
    pub entry_point: PathBuf,
    pub endpoint: String,
}

impl ShellConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_dir = std::env::current_dir().map_err(ConfigError::WorkingDir)?;
        Self::resolve(std::env::var_os(PREFIX_VAR), &base_dir)
    }

    pub fn resolve(prefix: Option<OsString>, base_dir: &Path) -> Result<Self, ConfigError> {
        let prefix = prefix
            .filter(|prefix| !prefix.is_empty())
            .ok_or(ConfigError::MissingPrefix(PREFIX_VAR))?;
        Ok(Self {
            interpreter: PathBuf::from(prefix).join(INTERPRETER),
            entry_point: base_dir.join(BACKEND_ENTRY),
            endpoint: ENDPOINT.to_string(),
        })
    }
}
