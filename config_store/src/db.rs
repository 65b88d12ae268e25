use std::{
    env,
    path::PathBuf,
    sync::{Arc, LazyLock},
};

use rustbreak::{DeSerError, DeSerializer};
use serde::{Serialize, de::DeserializeOwned};

use crate::interface::ConfigStore;

pub static CONFIG: LazyLock<ConfigStore> = LazyLock::new(ConfigStore::set_up_config);

#[cfg(not(debug_assertions))]
static DATA_ROOT_PREFIX: &str = "is-deployed";
#[cfg(debug_assertions)]
static DATA_ROOT_PREFIX: &str = "is-deployed-debug";

pub const DATA_DIR_ENV: &str = "IS_DEPLOYED_DATA_DIR";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub static DATA_ROOT_DIR: LazyLock<Arc<PathBuf>> = LazyLock::new(|| {
    if let Ok(dir) = env::var(DATA_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Arc::new(PathBuf::from(dir));
    }

    // Without a per-user data dir, keep the config next to the working directory
    Arc::new(
        dirs::data_dir()
            .map(|dir| dir.join(DATA_ROOT_PREFIX))
            .unwrap_or_else(|| PathBuf::from(".")),
    )
});

/// Plain JSON, so the config stays hand-editable.
#[derive(Debug, Default, Clone)]
pub struct ConfigJsonSerializer;

impl<T: Serialize + DeserializeOwned> DeSerializer<T> for ConfigJsonSerializer {
    fn serialize(&self, val: &T) -> rustbreak::error::DeSerResult<Vec<u8>> {
        serde_json::to_vec_pretty(val).map_err(|e| DeSerError::Internal(e.to_string()))
    }

    fn deserialize<R: std::io::Read>(&self, s: R) -> rustbreak::error::DeSerResult<T> {
        serde_json::from_reader(s).map_err(|e| DeSerError::Internal(e.to_string()))
    }
}
