//! TOML config file loading and creation.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use kiosk_common::ConfigError;

use crate::schema::KioskConfig;

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. A config that parses but fails
/// validation is replaced by the default config, with a warning.
pub fn load_from_path(path: &Path) -> Result<KioskConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: KioskConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = config.validate() {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(KioskConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path, creating a default
/// file on first run.
pub fn load_default() -> Result<KioskConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(KioskConfig::default());
    }

    load_from_path(&path)
}

/// Platform-specific default config file path
/// (e.g. `~/.config/secure-browser/config.toml` on Linux).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("secure-browser").join("config.toml"))
}

/// Write a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

fn default_config_toml() -> String {
    r##"# Secure Browser Configuration
# Only override what you want to change -- missing fields use defaults.

[browser]
# launch_url = "https://mobile.tds.cambiumast.com/launchpad/"
# product = "CAISecureBrowser"
# version = "0.1.0"
# dev_build = false      # adds a " (BETA)" user-agent suffix

[extensions]
# ids = []               # companion extension ids

[logging]
# filter = "kiosk=info"  # tracing EnvFilter directive
"##
    .to_string()
}
