use async_trait::async_trait;
use tokio::sync::mpsc;

use kiosk_common::PlatformError;
use kiosk_protocol::SpeakOptions;

/// One voice the speech engine can synthesize with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: Option<String>,
}

/// Progress events emitted by the engine while an utterance plays.
#[derive(Debug, Clone, PartialEq)]
pub enum TtsEvent {
    Start,
    Resume,
    Pause,
    End,
    Interrupted,
    Cancelled,
    Error { message: String },
    Word { char_index: u32 },
}

impl TtsEvent {
    /// Terminal conditions for an utterance: it will produce no further
    /// progress events after one of these.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TtsEvent::End | TtsEvent::Interrupted | TtsEvent::Cancelled | TtsEvent::Error { .. }
        )
    }
}

/// Speech synthesis engine.
///
/// `speak` returns as soon as the utterance is submitted; progress arrives on
/// the `events` sender. An engine that cannot deliver an event (receiver
/// dropped) may discard it.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn voices(&self) -> Result<Vec<Voice>, PlatformError>;

    fn speak(
        &self,
        text: &str,
        options: &SpeakOptions,
        events: mpsc::Sender<TtsEvent>,
    ) -> Result<(), PlatformError>;

    fn stop(&self);
    fn pause(&self);
    fn resume(&self);
}
