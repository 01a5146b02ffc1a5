use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("speech error: {0}")]
    SpeechError(String),

    #[error("audio error: {0}")]
    AudioError(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("power error: {0}")]
    PowerError(String),

    #[error("accessibility error: {0}")]
    AccessibilityError(String),

    #[error("extension channel error: {0}")]
    ChannelError(String),

    #[error("window error: {0}")]
    WindowError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
