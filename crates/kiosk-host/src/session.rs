//! Session state shared by the command handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use kiosk_platform::{
    AccessibilityFeatures, AudioControl, ChannelRequest, ExtensionTransport, IntegrityModule,
    KeyValueStore, PowerManager, SpeechSynthesizer, WindowControl,
};
use kiosk_protocol::{PlaybackStatus, Response};

use crate::extensions::InitScript;
use crate::response::{ContentView, ResponseChannel};

/// The platform collaborators a session runs against.
///
/// `audio` is optional: a `None` models a platform without audio control,
/// which the volume handlers surface as an immediate `FAILED`.
pub struct Platform {
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub audio: Option<Arc<dyn AudioControl>>,
    pub storage: Arc<dyn KeyValueStore>,
    pub power: Arc<dyn PowerManager>,
    pub accessibility: Arc<dyn AccessibilityFeatures>,
    pub window: Arc<dyn WindowControl>,
    pub extensions: Arc<dyn ExtensionTransport>,
    pub integrity: Arc<dyn IntegrityModule>,
}

/// One host session: the platform handles, the response channel, and every
/// piece of mutable state the handlers share. Playback status, the
/// connection map, and the init-script list are owned here rather than at
/// module scope, so each test can run its own isolated session.
pub struct HostSession {
    pub(crate) platform: Platform,
    pub(crate) view: Arc<dyn ContentView>,
    pub(crate) responses: ResponseChannel,
    pub(crate) playback: Mutex<PlaybackStatus>,
    pub(crate) connections: Mutex<HashMap<String, mpsc::Sender<ChannelRequest>>>,
    pub(crate) init_scripts: Mutex<Vec<InitScript>>,
}

impl HostSession {
    pub fn new(platform: Platform, view: Arc<dyn ContentView>) -> Arc<Self> {
        Arc::new(Self {
            platform,
            responses: ResponseChannel::new(Arc::clone(&view)),
            view,
            playback: Mutex::new(PlaybackStatus::Stopped),
            connections: Mutex::new(HashMap::new()),
            init_scripts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn respond(&self, response: Response) {
        self.responses.send(response);
    }

    /// Last-known state of the active utterance.
    pub fn playback_status(&self) -> PlaybackStatus {
        self.playback.lock().map(|s| *s).unwrap_or_default()
    }

    pub(crate) fn set_playback_status(&self, status: PlaybackStatus) {
        if let Ok(mut guard) = self.playback.lock() {
            *guard = status;
        }
    }

    /// Ids of the extensions with an open channel.
    pub fn connected_extensions(&self) -> Vec<String> {
        self.connections
            .lock()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Init scripts collected from extensions, in arrival order.
    pub fn init_scripts(&self) -> Vec<InitScript> {
        self.init_scripts
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}
