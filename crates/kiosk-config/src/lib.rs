//! Shell configuration: TOML file with serde defaults, so a partial (or
//! absent) file always yields a usable config.

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_default, load_from_path};
pub use schema::{BrowserConfig, ExtensionsConfig, KioskConfig, LoggingConfig};
