use std::{ops::Deref, path::PathBuf, sync::OnceLock};

use crate::player::{SoundPlayer, SoundPlayerBuilder};

pub mod clips;
pub mod error;
pub mod player;

pub use clips::Clip;

pub static SOUND_PLAYER: SoundPlayerWrapper = SoundPlayerWrapper::new();

pub struct SoundPlayerWrapper(OnceLock<SoundPlayer>);
impl SoundPlayerWrapper {
    const fn new() -> Self {
        SoundPlayerWrapper(OnceLock::new())
    }
    pub fn init(sfx_dir: Option<PathBuf>) {
        SOUND_PLAYER
            .0
            .set(SoundPlayerBuilder::build(sfx_dir))
            .unwrap_or_else(|_| panic!("Failed to initialise sound player"));
    }
}

impl Deref for SoundPlayerWrapper {
    type Target = SoundPlayer;

    fn deref(&self) -> &Self::Target {
        match self.0.get() {
            Some(sound_player) => sound_player,
            None => unreachable!("Sound player should always be initialised"),
        }
    }
}
