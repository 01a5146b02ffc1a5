pub mod errors;
pub mod id;

pub use errors::{ConfigError, KioskError, PlatformError};
pub use id::{new_request_id, REQUEST_ID_RANGE};

pub type Result<T> = std::result::Result<T, KioskError>;
