use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::{debug, info, warn};
use rodio::{Decoder, OutputStreamHandle, Source, source::SineWave};

use crate::error::SoundError;

const CLIP_EXTENSIONS: [&str; 4] = ["mp3", "wav", "ogg", "flac"];
const TONE_VOLUME: f32 = 0.2;

// (frequency in Hz, length in ms)
const SUCCESS_TONES: &[(f32, u64)] = &[(660.0, 110), (880.0, 180)];
const ERROR_TONES: &[(f32, u64)] = &[(220.0, 160), (196.0, 160), (174.6, 260)];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Clip {
    Success,
    Error,
}

impl Clip {
    fn file_stem(&self) -> &'static str {
        match self {
            Clip::Success => "ok",
            Clip::Error => "error",
        }
    }

    fn tones(&self) -> &'static [(f32, u64)] {
        match self {
            Clip::Success => SUCCESS_TONES,
            Clip::Error => ERROR_TONES,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ClipSource {
    Encoded(Arc<[u8]>),
    Tones(&'static [(f32, u64)]),
}

impl ClipSource {
    /// Loads `<sfx_dir>/<stem>.<ext>`, falling back to synthesized tones.
    pub fn load(sfx_dir: Option<&Path>, clip: Clip) -> Self {
        let Some(path) = sfx_dir.and_then(|dir| find_clip_file(dir, clip)) else {
            debug!("no {} clip on disk, using tones", clip.file_stem());
            return ClipSource::Tones(clip.tones());
        };

        match read_clip(&path) {
            Ok(bytes) => {
                info!("loaded sound clip {}", path.display());
                ClipSource::Encoded(bytes)
            }
            Err(e) => {
                warn!("{e}, using tones instead");
                ClipSource::Tones(clip.tones())
            }
        }
    }

    pub fn play(&self, handle: &OutputStreamHandle) -> Result<(), SoundError> {
        match self {
            ClipSource::Encoded(bytes) => {
                let decoder = Decoder::new(Cursor::new(bytes.clone()))?;
                handle.play_raw(decoder.convert_samples::<f32>())?;
            }
            ClipSource::Tones(tones) => {
                handle.play_raw(tone_sequence(tones))?;
            }
        }
        Ok(())
    }
}

pub fn find_clip_file(sfx_dir: &Path, clip: Clip) -> Option<PathBuf> {
    CLIP_EXTENSIONS
        .iter()
        .map(|ext| sfx_dir.join(format!("{}.{ext}", clip.file_stem())))
        .find(|path| path.is_file())
}

fn read_clip(path: &Path) -> Result<Arc<[u8]>, SoundError> {
    let bytes: Arc<[u8]> = fs::read(path)
        .map_err(|e| SoundError::Read(path.to_path_buf(), e))?
        .into();

    // Decode once up front so a broken file is caught at startup
    Decoder::new(Cursor::new(bytes.clone()))?;
    Ok(bytes)
}

fn tone_sequence(tones: &'static [(f32, u64)]) -> impl Source<Item = f32> + Send + 'static {
    rodio::source::from_iter(tones.iter().map(|(frequency, millis)| {
        SineWave::new(*frequency)
            .take_duration(Duration::from_millis(*millis))
            .amplify(TONE_VOLUME)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_falls_back_to_tones() {
        let source = ClipSource::load(None, Clip::Success);
        assert!(matches!(source, ClipSource::Tones(t) if t == SUCCESS_TONES));
    }

    #[test]
    fn clip_file_is_found_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("error.wav"), b"").unwrap();

        assert_eq!(
            find_clip_file(dir.path(), Clip::Error),
            Some(dir.path().join("error.wav"))
        );
        assert_eq!(find_clip_file(dir.path(), Clip::Success), None);
    }

    #[test]
    fn undecodable_file_falls_back_to_tones() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.mp3"), b"definitely not audio").unwrap();

        let source = ClipSource::load(Some(dir.path()), Clip::Success);
        assert!(matches!(source, ClipSource::Tones(_)));
    }
}
