//! The closed command set, parsed into a tagged enum with typed payloads.
//! An exhaustive enum rather than a string lookup table, so a new command
//! cannot be added without the dispatcher handling it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options forwarded to the speech engine with an utterance.
///
/// The shape mirrors the engine's own options object; unknown keys are
/// carried through untouched in `extra` (no validation, by contract).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeakOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// Queue behind the current utterance instead of interrupting it.
    pub enqueue: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A recognized command with its typed parameter payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TtsInit,
    TtsInitWithHack,
    TtsSpeak { text: String, options: SpeakOptions },
    TtsSpeakChunks { chunks: Vec<String>, options: SpeakOptions },
    TtsStop,
    TtsPause,
    TtsResume,
    TtsStatus,
    UiFullscreen,
    AppClose,
    AppStoreData(Map<String, Value>),
    AppClearData(Vec<String>),
    AppGetVolume,
    AppSetVolume(Value),
    ConnectExtension(Vec<String>),
    /// `Some(reason)` requests a keep-awake hold; `None` releases it.
    AppKeepAwake(Option<String>),
    AppSpokenFeedback(bool),
    BrowserHash(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandParseError {
    /// Answered with a single `FAIL` / "Unknown command" response.
    #[error("unknown command: {0}")]
    Unknown(String),
    /// Dropped without any response at all. Handlers answer nothing when
    /// required params are missing; that quirk is part of the wire contract.
    #[error("command {0} requires params")]
    MissingParams(&'static str),
}

impl Command {
    /// Parse a wire command name and its payload.
    ///
    /// `message` is the envelope's extra `message` field, used only by
    /// `BROWSER HASH`.
    pub fn parse(
        command: &str,
        params: &Value,
        message: Option<&str>,
    ) -> Result<Self, CommandParseError> {
        match command {
            "TTS INIT" => Ok(Self::TtsInit),
            "TTS INITWITHHACK" => Ok(Self::TtsInitWithHack),
            "TTS SPEAK" => {
                if is_falsy(params) {
                    return Err(CommandParseError::MissingParams("TTS SPEAK"));
                }
                Ok(Self::TtsSpeak {
                    text: element_string(params, 0),
                    options: speak_options(params.get(1)),
                })
            }
            "TTS SPEAKCHUNKS" => {
                if is_falsy(params) {
                    return Err(CommandParseError::MissingParams("TTS SPEAKCHUNKS"));
                }
                Ok(Self::TtsSpeakChunks {
                    chunks: string_array(params.get(0)),
                    options: speak_options(params.get(1)),
                })
            }
            "TTS STOP" => Ok(Self::TtsStop),
            "TTS PAUSE" => Ok(Self::TtsPause),
            "TTS RESUME" => Ok(Self::TtsResume),
            "TTS STATUS" => Ok(Self::TtsStatus),
            "UI FULLSCREEN" => Ok(Self::UiFullscreen),
            "APP CLOSE" => Ok(Self::AppClose),
            "APP STOREDATA" => Ok(Self::AppStoreData(
                params.as_object().cloned().unwrap_or_default(),
            )),
            "APP CLEARDATA" => Ok(Self::AppClearData(match params {
                // The platform store accepts a single key or a key list.
                Value::String(key) => vec![key.clone()],
                other => string_array(Some(other)),
            })),
            "APP GETVOLUME" => Ok(Self::AppGetVolume),
            "APP SETVOLUME" => Ok(Self::AppSetVolume(params.clone())),
            "CONNECT EXTENSION" => {
                if is_falsy(params) {
                    return Err(CommandParseError::MissingParams("CONNECT EXTENSION"));
                }
                Ok(Self::ConnectExtension(string_array(Some(params))))
            }
            "APP KEEPAWAKE" => Ok(Self::AppKeepAwake(match params.as_str() {
                Some(reason) if !reason.is_empty() => Some(reason.to_string()),
                _ => None,
            })),
            "APP SPOKEN_FEEDBACK" => Ok(Self::AppSpokenFeedback(!is_falsy(params))),
            "BROWSER HASH" => match message {
                Some(msg) => Ok(Self::BrowserHash(msg.to_string())),
                None => Err(CommandParseError::MissingParams("BROWSER HASH")),
            },
            other => Err(CommandParseError::Unknown(other.to_string())),
        }
    }
}

/// JS-style falsiness, matching the content page's `if (!params)` guards.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn element_string(params: &Value, index: usize) -> String {
    params
        .get(index)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn speak_options(value: Option<&Value>) -> SpeakOptions {
    value
        .cloned()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .unwrap_or_default()
}
