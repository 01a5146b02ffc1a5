use kiosk_common::PlatformError;

/// Prevent-sleep holds, keyed by a caller-supplied reason string.
pub trait PowerManager: Send + Sync {
    fn request_keep_awake(&self, reason: &str) -> Result<(), PlatformError>;
    fn release_keep_awake(&self) -> Result<(), PlatformError>;
}
