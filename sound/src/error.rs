use std::{
    fmt::{Display, Formatter},
    io,
    path::PathBuf,
};

use rodio::{PlayError, StreamError, decoder::DecoderError};
use serde_with::SerializeDisplay;

#[derive(Debug, SerializeDisplay)]
pub enum SoundError {
    NoOutput(StreamError),
    Read(PathBuf, io::Error),
    Decode(DecoderError),
    Play(PlayError),
}

impl Display for SoundError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SoundError::NoOutput(error) => write!(f, "no audio output available: {error}"),
            SoundError::Read(path, error) => {
                write!(f, "could not read sound clip {}: {error}", path.display())
            }
            SoundError::Decode(error) => write!(f, "could not decode sound clip: {error}"),
            SoundError::Play(error) => write!(f, "could not play sound clip: {error}"),
        }
    }
}

impl std::error::Error for SoundError {}

impl From<StreamError> for SoundError {
    fn from(value: StreamError) -> Self {
        SoundError::NoOutput(value)
    }
}
impl From<DecoderError> for SoundError {
    fn from(value: DecoderError) -> Self {
        SoundError::Decode(value)
    }
}
impl From<PlayError> for SoundError {
    fn from(value: PlayError) -> Self {
        SoundError::Play(value)
    }
}
