//! In-process fakes for the platform collaborators and the content view.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use kiosk_common::PlatformError;
use kiosk_platform::{
    AccessibilityFeature, AccessibilityFeatures, AudioControl, AudioDevice, ChannelRequest,
    ExtensionChannel, ExtensionMessage, ExtensionTransport, MemoryStore, PowerManager,
    Sha256Integrity, SpeechSynthesizer, TtsEvent, Voice, WindowControl,
};
use kiosk_protocol::{Response, ResponseEnvelope, SpeakOptions};

use crate::response::ContentView;
use crate::session::{HostSession, Platform};

// -- Content view --

/// Captures posted responses on a channel and executed scripts in a list.
pub struct RecordingView {
    responses: mpsc::UnboundedSender<Response>,
    pub scripts: Mutex<Vec<String>>,
}

impl RecordingView {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Response>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                responses: tx,
                scripts: Mutex::new(Vec::new()),
            }),
            rx,
        )
    }
}

impl ContentView for RecordingView {
    fn post_message(&self, envelope: &ResponseEnvelope) {
        let _ = self.responses.send(envelope.response.clone());
    }

    fn execute_script(&self, code: &str) {
        self.scripts.lock().unwrap().push(code.to_string());
    }
}

// -- Speech --

/// Records submitted utterances and exposes their event senders so tests can
/// drive engine events by hand.
#[derive(Default)]
pub struct ScriptedSpeech {
    pub voice_list: Vec<Voice>,
    pub utterances: Mutex<Vec<(String, SpeakOptions)>>,
    pub calls: Mutex<Vec<&'static str>>,
    sinks: Mutex<Vec<mpsc::Sender<TtsEvent>>>,
}

impl ScriptedSpeech {
    pub fn with_voices(names: &[&str]) -> Self {
        Self {
            voice_list: names
                .iter()
                .map(|n| Voice {
                    name: n.to_string(),
                    lang: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Deliver an engine event to the most recent utterance's listener.
    pub async fn emit(&self, event: TtsEvent) {
        let sink = self
            .sinks
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no utterance submitted");
        sink.send(event).await.expect("listener gone");
    }

    /// Drop all stored event senders, closing the listeners' streams.
    pub fn end_stream(&self) {
        self.sinks.lock().unwrap().clear();
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSpeech {
    async fn voices(&self) -> Result<Vec<Voice>, PlatformError> {
        Ok(self.voice_list.clone())
    }

    fn speak(
        &self,
        text: &str,
        options: &SpeakOptions,
        events: mpsc::Sender<TtsEvent>,
    ) -> Result<(), PlatformError> {
        self.utterances
            .lock()
            .unwrap()
            .push((text.to_string(), options.clone()));
        self.sinks.lock().unwrap().push(events);
        Ok(())
    }

    fn stop(&self) {
        self.calls.lock().unwrap().push("stop");
    }

    fn pause(&self) {
        self.calls.lock().unwrap().push("pause");
    }

    fn resume(&self) {
        self.calls.lock().unwrap().push("resume");
    }
}

// -- Audio --

pub struct FakeAudio {
    pub devices: Vec<AudioDevice>,
    pub applied: Mutex<Vec<(String, Value)>>,
}

impl FakeAudio {
    pub fn with_devices(devices: Vec<AudioDevice>) -> Self {
        Self {
            devices,
            applied: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AudioControl for FakeAudio {
    async fn output_devices(&self) -> Result<Vec<AudioDevice>, PlatformError> {
        Ok(self.devices.clone())
    }

    async fn set_properties(&self, device_id: &str, props: &Value) -> Result<(), PlatformError> {
        self.applied
            .lock()
            .unwrap()
            .push((device_id.to_string(), props.clone()));
        Ok(())
    }
}

// -- Power / accessibility / window --

#[derive(Default)]
pub struct FakePower {
    pub holds: Mutex<Vec<String>>,
    pub fail: bool,
}

impl PowerManager for FakePower {
    fn request_keep_awake(&self, reason: &str) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::PowerError("denied".into()));
        }
        self.holds.lock().unwrap().push(reason.to_string());
        Ok(())
    }

    fn release_keep_awake(&self) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::PowerError("denied".into()));
        }
        self.holds.lock().unwrap().clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAccessibility {
    pub toggles: Mutex<Vec<(AccessibilityFeature, bool)>>,
    pub fail: bool,
}

impl AccessibilityFeatures for FakeAccessibility {
    fn set_enabled(
        &self,
        feature: AccessibilityFeature,
        enabled: bool,
    ) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::AccessibilityError("unavailable".into()));
        }
        self.toggles.lock().unwrap().push((feature, enabled));
        Ok(())
    }

    fn restrict_virtual_keyboard(&self) -> Result<(), PlatformError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeWindow {
    pub closed: AtomicBool,
}

impl WindowControl for FakeWindow {
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

// -- Extension transport --

/// Per-extension behavior of the fake transport.
#[derive(Debug, Clone)]
pub enum ExtensionBehavior {
    /// `connect` fails synchronously.
    FailOpen,
    /// Channel opens and replies to `injectScript` with an init-script
    /// payload.
    ReplyInit(&'static str),
    /// Channel opens and replies with a script to execute immediately.
    ReplyExec(&'static str),
    /// Channel opens but never replies (stays connected past the deadline).
    Silent,
    /// Channel opens and replies with a script to execute, but only after
    /// the given number of seconds.
    ReplyAfterSecs(u64, &'static str),
    /// Channel opens, then the remote disconnects without replying.
    Disconnect,
}

#[derive(Default)]
pub struct FakeTransport {
    behaviors: HashMap<String, ExtensionBehavior>,
}

impl FakeTransport {
    pub fn new(entries: &[(&str, ExtensionBehavior)]) -> Self {
        Self {
            behaviors: entries
                .iter()
                .map(|(id, b)| (id.to_string(), b.clone()))
                .collect(),
        }
    }
}

impl ExtensionTransport for FakeTransport {
    fn connect(&self, extension_id: &str) -> Result<ExtensionChannel, PlatformError> {
        let behavior = self
            .behaviors
            .get(extension_id)
            .cloned()
            .unwrap_or(ExtensionBehavior::Silent);
        if matches!(behavior, ExtensionBehavior::FailOpen) {
            return Err(PlatformError::ChannelError("no such extension".into()));
        }

        let (req_tx, mut req_rx) = mpsc::channel::<ChannelRequest>(8);
        let (msg_tx, msg_rx) = mpsc::channel::<ExtensionMessage>(8);

        tokio::spawn(async move {
            // Wait for the inject-script request before reacting.
            let _ = req_rx.recv().await;
            match behavior {
                ExtensionBehavior::ReplyInit(code) => {
                    let _ = msg_tx
                        .send(ExtensionMessage {
                            name: "ext_getInitScripts".into(),
                            code: code.into(),
                        })
                        .await;
                    // Stay connected afterwards.
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
                ExtensionBehavior::ReplyExec(code) => {
                    let _ = msg_tx
                        .send(ExtensionMessage {
                            name: "runScript".into(),
                            code: code.into(),
                        })
                        .await;
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
                ExtensionBehavior::Silent => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    drop(msg_tx);
                }
                ExtensionBehavior::ReplyAfterSecs(secs, code) => {
                    tokio::time::sleep(Duration::from_secs(secs)).await;
                    let _ = msg_tx
                        .send(ExtensionMessage {
                            name: "runScript".into(),
                            code: code.into(),
                        })
                        .await;
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
                ExtensionBehavior::Disconnect => drop(msg_tx),
                ExtensionBehavior::FailOpen => unreachable!(),
            }
        });

        Ok(ExtensionChannel {
            requests: req_tx,
            messages: msg_rx,
        })
    }
}

// -- Harness --

pub struct Harness {
    pub session: Arc<HostSession>,
    pub responses: mpsc::UnboundedReceiver<Response>,
    pub view: Arc<RecordingView>,
    pub speech: Arc<ScriptedSpeech>,
    pub audio: Option<Arc<FakeAudio>>,
    pub store: Arc<MemoryStore>,
    pub power: Arc<FakePower>,
    pub accessibility: Arc<FakeAccessibility>,
    pub window: Arc<FakeWindow>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(ScriptedSpeech::default(), None, FakeTransport::default())
    }

    pub fn with_speech(speech: ScriptedSpeech) -> Self {
        Self::build(speech, None, FakeTransport::default())
    }

    pub fn with_audio(devices: Vec<AudioDevice>) -> Self {
        Self::build(
            ScriptedSpeech::default(),
            Some(Arc::new(FakeAudio::with_devices(devices))),
            FakeTransport::default(),
        )
    }

    pub fn with_transport(transport: FakeTransport) -> Self {
        Self::build(ScriptedSpeech::default(), None, transport)
    }

    fn build(
        speech: ScriptedSpeech,
        audio: Option<Arc<FakeAudio>>,
        transport: FakeTransport,
    ) -> Self {
        let (view, responses) = RecordingView::new();
        let speech = Arc::new(speech);
        let store = Arc::new(MemoryStore::new());
        let power = Arc::new(FakePower::default());
        let accessibility = Arc::new(FakeAccessibility::default());
        let window = Arc::new(FakeWindow::default());

        let platform = Platform {
            speech: Arc::clone(&speech) as _,
            audio: audio.clone().map(|a| a as _),
            storage: Arc::clone(&store) as _,
            power: Arc::clone(&power) as _,
            accessibility: Arc::clone(&accessibility) as _,
            window: Arc::clone(&window) as _,
            extensions: Arc::new(transport) as _,
            integrity: Arc::new(Sha256Integrity) as _,
        };
        let session = HostSession::new(platform, Arc::clone(&view) as _);

        Self {
            session,
            responses,
            view,
            speech,
            audio,
            store,
            power,
            accessibility,
            window,
        }
    }

    /// Wrap a command in the inbound envelope and dispatch it.
    pub async fn send_command(&self, command: &str, params: Value) {
        let raw = serde_json::json!({
            "type": "CHROME COMMAND",
            "command": command,
            "params": params,
        })
        .to_string();
        self.session.handle_message(&raw).await;
    }

    /// Next captured response, or panic if none arrives.
    pub async fn next_response(&mut self) -> Response {
        self.responses.recv().await.expect("response channel closed")
    }

    /// A response that must already be available without further waiting.
    pub fn try_next_response(&mut self) -> Option<Response> {
        self.responses.try_recv().ok()
    }
}
