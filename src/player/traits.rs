use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    One,
    All,
}

impl RepeatMode {
    /// Off → All → One → Off
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// The audio device the store drives 🔊
///
/// Implementations own decoding and output; the store only issues commands
/// and reads back the paused flag and the playback position.
pub trait AudioOutput {
    fn load(&mut self, uri: &str) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn seek(&mut self, position_secs: f64) -> Result<()>;
    /// Drop the current source (`src = ""`).
    fn unload(&mut self) -> Result<()>;

    fn is_paused(&self) -> bool;
    /// Position within the current source, in seconds.
    fn position(&self) -> f64;
}

/// A side effect produced by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Load(String),
    Play,
    Pause,
    Seek(f64),
    Unload,
}

impl AudioCommand {
    pub fn apply<O: AudioOutput + ?Sized>(&self, output: &mut O) -> Result<()> {
        match self {
            Self::Load(uri) => output.load(uri),
            Self::Play => output.play(),
            Self::Pause => output.pause(),
            Self::Seek(secs) => output.seek(*secs),
            Self::Unload => output.unload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_off_all_one() {
        let mut mode = RepeatMode::default();
        assert_eq!(mode, RepeatMode::Off);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::All);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::One);
        mode = mode.cycle();
        assert_eq!(mode, RepeatMode::Off);
    }
}
