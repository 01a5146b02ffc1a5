//! Host-neutral platform wiring for the shell binary.
//!
//! The dispatch core only sees the trait objects; these implementations are
//! the portable defaults the binary ships with. OS-specific speech or audio
//! backends slot in here without touching the host crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use winit::event_loop::EventLoopProxy;

use kiosk_common::PlatformError;
use kiosk_host::Platform;
use kiosk_platform::{
    AccessibilityFeature, AccessibilityFeatures, ExtensionChannel, ExtensionTransport, MemoryStore,
    PowerManager, Sha256Integrity, SpeechSynthesizer, TtsEvent, Voice, WindowControl,
};
use kiosk_protocol::SpeakOptions;

use crate::events::ShellEvent;

/// Speech backend that accepts every utterance and reports it played
/// immediately. Keeps the TTS command surface exercisable on hosts without
/// an engine.
pub struct NullSpeech;

#[async_trait]
impl SpeechSynthesizer for NullSpeech {
    async fn voices(&self) -> Result<Vec<Voice>, PlatformError> {
        Ok(Vec::new())
    }

    fn speak(
        &self,
        text: &str,
        _options: &SpeakOptions,
        events: mpsc::Sender<TtsEvent>,
    ) -> Result<(), PlatformError> {
        debug!(chars = text.len(), "utterance discarded: no speech engine");
        tokio::spawn(async move {
            let _ = events.send(TtsEvent::Start).await;
            let _ = events.send(TtsEvent::End).await;
        });
        Ok(())
    }

    fn stop(&self) {}
    fn pause(&self) {}
    fn resume(&self) {}
}

/// Keep-awake bookkeeping without an OS inhibitor.
#[derive(Default)]
pub struct LoggingPower {
    hold: Mutex<Option<String>>,
}

impl PowerManager for LoggingPower {
    fn request_keep_awake(&self, reason: &str) -> Result<(), PlatformError> {
        info!(reason = %reason, "keep-awake requested");
        *self
            .hold
            .lock()
            .map_err(|_| PlatformError::PowerError("hold lock poisoned".into()))? =
            Some(reason.to_string());
        Ok(())
    }

    fn release_keep_awake(&self) -> Result<(), PlatformError> {
        info!("keep-awake released");
        *self
            .hold
            .lock()
            .map_err(|_| PlatformError::PowerError("hold lock poisoned".into()))? = None;
        Ok(())
    }
}

/// Accessibility surface on hosts that expose none: every toggle succeeds as
/// a no-op, which is exactly what the lockdown sequence expects from a
/// platform without the feature.
pub struct NullAccessibility;

impl AccessibilityFeatures for NullAccessibility {
    fn set_enabled(
        &self,
        feature: AccessibilityFeature,
        enabled: bool,
    ) -> Result<(), PlatformError> {
        debug!(feature = ?feature, enabled, "accessibility toggle (no-op)");
        Ok(())
    }

    fn restrict_virtual_keyboard(&self) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Window teardown via the event loop: `APP CLOSE` runs on a tokio task, the
/// window lives on the event-loop thread.
pub struct ProxyWindow {
    proxy: Mutex<EventLoopProxy<ShellEvent>>,
}

impl ProxyWindow {
    pub fn new(proxy: EventLoopProxy<ShellEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }
}

impl WindowControl for ProxyWindow {
    fn close(&self) {
        if let Ok(proxy) = self.proxy.lock() {
            if proxy.send_event(ShellEvent::CloseRequested).is_err() {
                warn!("close request dropped: event loop gone");
            }
        }
    }
}

/// Transport on hosts without an extension runtime: every open fails
/// synchronously, so `CONNECT EXTENSION` settles without registering
/// attempts.
pub struct NoExtensionHost;

impl ExtensionTransport for NoExtensionHost {
    fn connect(&self, extension_id: &str) -> Result<ExtensionChannel, PlatformError> {
        Err(PlatformError::ChannelError(format!(
            "no extension host for {extension_id}"
        )))
    }
}

/// Assemble the production platform around the event-loop proxy.
pub fn build(proxy: EventLoopProxy<ShellEvent>) -> (Platform, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let platform = Platform {
        speech: Arc::new(NullSpeech),
        audio: None,
        storage: Arc::clone(&store) as _,
        power: Arc::new(LoggingPower::default()),
        accessibility: Arc::new(NullAccessibility),
        window: Arc::new(ProxyWindow::new(proxy)),
        extensions: Arc::new(NoExtensionHost),
        integrity: Arc::new(Sha256Integrity),
    };
    (platform, store)
}
