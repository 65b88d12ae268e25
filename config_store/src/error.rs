use std::{
    fmt::{Display, Formatter},
    io,
    path::PathBuf,
};

use rustbreak::RustbreakError;
use serde_with::SerializeDisplay;

#[derive(Debug, SerializeDisplay)]
pub enum ConfigError {
    Store(RustbreakError),
    Backup(PathBuf, io::Error),
    CreateDir(PathBuf, io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Store(error) => write!(f, "config store error: {error}"),
            ConfigError::Backup(path, error) => {
                write!(f, "failed to move corrupted config to {}: {error}", path.display())
            }
            ConfigError::CreateDir(path, error) => {
                write!(f, "failed to create config directory {}: {error}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<RustbreakError> for ConfigError {
    fn from(value: RustbreakError) -> Self {
        ConfigError::Store(value)
    }
}
