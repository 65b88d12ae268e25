use serde::{Deserialize, Serialize};

/// The single persisted record. `None` means the value was never set.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub path: Option<String>,
    pub filename: Option<String>,
    pub show_info: Option<bool>,
}

impl Config {
    /// Startup shows the info dialog unless the user explicitly declined it.
    pub fn show_info_at_startup(&self) -> bool {
        self.show_info.unwrap_or(true)
    }

    pub fn path_or_empty(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    pub fn filename_or_empty(&self) -> &str {
        self.filename.as_deref().unwrap_or_default()
    }
}
