use std::fmt::Display;

use config_store::error::ConfigError;
use serde_with::SerializeDisplay;

#[derive(Debug, SerializeDisplay)]
pub enum CommandError {
    Config(ConfigError),
    Window(tauri::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Config(error) => write!(f, "could not save settings: {error}"),
            CommandError::Window(error) => write!(f, "window error: {error}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ConfigError> for CommandError {
    fn from(value: ConfigError) -> Self {
        CommandError::Config(value)
    }
}
impl From<tauri::Error> for CommandError {
    fn from(value: tauri::Error) -> Self {
        CommandError::Window(value)
    }
}
