//! Platform collaborators consumed by the host as opaque interfaces.
//!
//! The dispatch core never talks to the OS directly; every privileged
//! surface (speech synthesis, audio devices, key/value storage, power,
//! accessibility, window lifecycle, extension channels) sits behind a trait
//! defined here. Production wiring lives in the app crate; tests substitute
//! in-process fakes.

pub mod accessibility;
pub mod audio;
pub mod extension;
pub mod integrity;
pub mod power;
pub mod speech;
pub mod storage;
pub mod window;

pub use accessibility::{AccessibilityFeature, AccessibilityFeatures};
pub use audio::{AudioControl, AudioDevice};
pub use extension::{ChannelRequest, ExtensionChannel, ExtensionMessage, ExtensionTransport};
pub use integrity::{IntegrityModule, Sha256Integrity};
pub use power::PowerManager;
pub use speech::{SpeechSynthesizer, TtsEvent, Voice};
pub use storage::{KeyValueStore, MemoryStore};
pub use window::WindowControl;
