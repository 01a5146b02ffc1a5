use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use kiosk_common::PlatformError;

/// One audio output device as reported by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDevice {
    pub id: String,
    pub is_active: bool,
    pub volume: f64,
    pub is_muted: bool,
}

/// Audio device enumeration and control.
///
/// Hosts on platforms without audio control carry no implementation at all
/// (`Option::None` at the session level); the volume handlers answer
/// `FAILED` in that case.
#[async_trait]
pub trait AudioControl: Send + Sync {
    async fn output_devices(&self) -> Result<Vec<AudioDevice>, PlatformError>;

    /// Apply a property object (volume, mute, ...) to a device. The property
    /// shape is the caller's payload, passed through opaquely.
    async fn set_properties(&self, device_id: &str, props: &Value) -> Result<(), PlatformError>;
}
