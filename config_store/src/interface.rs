use std::{
    fs,
    ops::{Deref, DerefMut},
    path::{Path, PathBuf},
    sync::{RwLockReadGuard, RwLockWriteGuard},
};

use log::{debug, error, info, warn};
use rustbreak::{PathDatabase, RustbreakError};

use crate::{
    Config,
    db::{CONFIG, CONFIG_FILE_NAME, ConfigJsonSerializer, DATA_ROOT_DIR},
    error::ConfigError,
};

pub struct ConfigStore {
    db: PathDatabase<Config, ConfigJsonSerializer>,
    path: PathBuf,
    existed: bool,
    backup: Option<PathBuf>,
}

impl ConfigStore {
    pub fn set_up_config() -> Self {
        let path = DATA_ROOT_DIR.join(CONFIG_FILE_NAME);
        debug!("opening config at {}", path.display());

        Self::open(path).unwrap_or_else(|e| panic!("Failed to open config: {e}"))
    }

    /// Opens the store at `path`, creating a default record if the file is
    /// missing. A file that no longer parses is moved aside to `<path>.bak`.
    pub fn open(path: PathBuf) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDir(parent.to_path_buf(), e))?;
        }

        let existed = path.exists();
        if !existed {
            info!("no config found, creating a default one");
            let db = create_default(&path)?;
            return Ok(Self {
                db,
                path,
                existed,
                backup: None,
            });
        }

        match PathDatabase::load_from_path(path.clone()) {
            Ok(db) => Ok(Self {
                db,
                path,
                existed,
                backup: None,
            }),
            Err(RustbreakError::DeSerialization(e)) => {
                let backup = backup_path(&path);
                warn!(
                    "config at {} is corrupted ({e}), moving it to {}",
                    path.display(),
                    backup.display()
                );
                fs::rename(&path, &backup).map_err(|e| ConfigError::Backup(backup.clone(), e))?;

                let db = create_default(&path)?;
                Ok(Self {
                    db,
                    path,
                    existed: false,
                    backup: Some(backup),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a config file was on disk when the store was opened.
    pub fn exists(&self) -> bool {
        self.existed
    }

    /// Where a corrupted config was moved to, if that happened on open.
    pub fn backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.db.save()?;
        Ok(())
    }

    pub fn borrow_checked(&self) -> RwLockReadGuard<'_, Config> {
        match self.db.borrow_data() {
            Ok(data) => data,
            Err(e) => {
                let msg = format!("config borrow failed with error {e}");
                error!("{msg}");
                panic!("{msg}");
            }
        }
    }

    /// Writable borrow that saves the config when dropped.
    pub fn borrow_mut_checked(&self) -> ConfigWrite<'_> {
        match self.db.borrow_data_mut() {
            Ok(data) => ConfigWrite {
                store: self,
                guard: Some(data),
                saved: false,
            },
            Err(e) => {
                let msg = format!("config mut borrow failed with error {e}");
                error!("{msg}");
                panic!("{msg}");
            }
        }
    }
}

fn create_default(
    path: &Path,
) -> Result<PathDatabase<Config, ConfigJsonSerializer>, ConfigError> {
    let db = PathDatabase::create_at_path(path.to_path_buf(), Config::default())?;
    db.save()?;
    Ok(db)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

pub struct ConfigWrite<'a> {
    store: &'a ConfigStore,
    guard: Option<RwLockWriteGuard<'a, Config>>,
    saved: bool,
}

impl ConfigWrite<'_> {
    /// Saves now and reports the outcome instead of logging it on drop.
    pub fn commit(mut self) -> Result<(), ConfigError> {
        drop(self.guard.take());
        self.saved = true;
        self.store.save()
    }
}

impl Deref for ConfigWrite<'_> {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        match &self.guard {
            Some(guard) => guard,
            None => unreachable!("config guard is only taken on drop"),
        }
    }
}

impl DerefMut for ConfigWrite<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match &mut self.guard {
            Some(guard) => guard,
            None => unreachable!("config guard is only taken on drop"),
        }
    }
}

impl Drop for ConfigWrite<'_> {
    fn drop(&mut self) {
        // Release the write lock first, saving needs a read lock
        drop(self.guard.take());
        if self.saved {
            return;
        }

        if let Err(e) = self.store.save() {
            error!("failed to save config to {}: {e}", self.store.path().display());
        }
    }
}

pub fn borrow_config_checked() -> RwLockReadGuard<'static, Config> {
    CONFIG.borrow_checked()
}

pub fn borrow_config_mut_checked() -> ConfigWrite<'static> {
    CONFIG.borrow_mut_checked()
}
