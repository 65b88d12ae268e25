use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, Sender, channel},
    },
    thread::{JoinHandle, spawn},
};

use log::{debug, error, warn};
use parking_lot::Mutex;
use rodio::OutputStream;

use crate::{
    clips::{Clip, ClipSource},
    error::SoundError,
};

pub enum SoundSignal {
    Play(Clip),
    Finish,
}

/*

The output stream is !Send, so it is opened on the sound thread and lives
there until Finish. Callers only talk to it through SoundSignal.

*/

pub struct SoundPlayerBuilder {
    sfx_dir: Option<PathBuf>,
    command_receiver: Receiver<SoundSignal>,
}

impl SoundPlayerBuilder {
    pub fn build(sfx_dir: Option<PathBuf>) -> SoundPlayer {
        let (command_sender, command_receiver) = channel();
        let builder = Self {
            sfx_dir,
            command_receiver,
        };

        let terminator = spawn(move || builder.manage_signals());

        SoundPlayer {
            command_sender,
            muted: AtomicBool::new(false),
            terminator: Mutex::new(Some(terminator)),
        }
    }

    fn manage_signals(self) {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(e) => {
                warn!("{}, sounds are disabled", SoundError::from(e));
                None
            }
        };

        let success = ClipSource::load(self.sfx_dir.as_deref(), Clip::Success);
        let failure = ClipSource::load(self.sfx_dir.as_deref(), Clip::Error);

        loop {
            let signal = match self.command_receiver.recv() {
                Ok(signal) => signal,
                Err(_) => return,
            };

            match signal {
                SoundSignal::Play(clip) => {
                    debug!("got signal Play({clip:?})");
                    let Some((_stream, handle)) = &output else {
                        continue;
                    };
                    let source = match clip {
                        Clip::Success => &success,
                        Clip::Error => &failure,
                    };
                    if let Err(e) = source.play(handle) {
                        error!("{e}");
                    }
                }
                SoundSignal::Finish => {
                    debug!("got signal Finish");
                    return;
                }
            }
        }
    }
}

pub struct SoundPlayer {
    command_sender: Sender<SoundSignal>,
    muted: AtomicBool,
    terminator: Mutex<Option<JoinHandle<()>>>,
}

impl SoundPlayer {
    pub fn play(&self, clip: Clip) {
        if self.is_muted() {
            debug!("muted, skipping {clip:?}");
            return;
        }

        if self.command_sender.send(SoundSignal::Play(clip)).is_err() {
            warn!("sound thread is gone, dropping {clip:?}");
        }
    }

    /// Flips the mute flag and returns the new value.
    pub fn toggle_mute(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    /// Stops the sound thread and waits for it. Safe to call repeatedly.
    pub fn ensure_terminated(&self) {
        let Some(terminator) = self.terminator.lock().take() else {
            return;
        };

        let _ = self.command_sender.send(SoundSignal::Finish);
        if terminator.join().is_err() {
            error!("sound thread panicked");
        }
    }
}
