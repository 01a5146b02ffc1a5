use serde::{Deserialize, Serialize};
use std::fmt;

/// Response status vocabulary.
///
/// `Fail` and `Failed` are distinct spellings on the wire: handlers answer
/// `FAIL` for caught platform exceptions and unknown commands, while the
/// volume handlers answer `FAILED` when audio control is unsupported. The
/// content view matches on both, so both are preserved rather than
/// normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Pending,
    Fail,
    Failed,
}

/// Last-known state of the active speech utterance.
///
/// Mutated only by speech event callbacks; read by the `TTS STATUS` handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        };
        write!(f, "{s}")
    }
}
