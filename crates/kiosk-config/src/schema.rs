//! Configuration schema. Every section and field carries a serde default so
//! partial files deserialize cleanly.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KioskConfig {
    pub browser: BrowserConfig,
    pub extensions: ExtensionsConfig,
    pub logging: LoggingConfig,
}

impl KioskConfig {
    /// Reject configs the shell cannot start with. Callers warn and fall
    /// back to defaults rather than aborting.
    pub fn validate(&self) -> Result<(), String> {
        let url = &self.browser.launch_url;
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(format!("launch_url must be http(s), got {url:?}"));
        }
        if self.browser.product.is_empty() {
            return Err("browser.product must not be empty".to_string());
        }
        Ok(())
    }
}

/// Content-view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Fallback URL when the store holds no `launchUrl` key.
    pub launch_url: String,
    /// Product token appended to the user agent.
    pub product: String,
    /// Version advertised in the user agent.
    pub version: String,
    /// Dev builds advertise a ` (BETA)` user-agent suffix.
    pub dev_build: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            launch_url: "https://mobile.tds.cambiumast.com/launchpad/".to_string(),
            product: "CAISecureBrowser".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            dev_build: false,
        }
    }
}

/// Companion extensions the shell may be asked to connect to.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Extension ids connected at the page's request via `CONNECT EXTENSION`.
    pub ids: Vec<String>,
}

/// Logging directive for the tracing subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `kiosk=debug`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "kiosk=info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = KioskConfig::default();
        config.validate().unwrap();
        assert_eq!(
            config.browser.launch_url,
            "https://mobile.tds.cambiumast.com/launchpad/"
        );
        assert_eq!(config.browser.product, "CAISecureBrowser");
        assert!(!config.browser.dev_build);
        assert!(config.extensions.ids.is_empty());
        assert_eq!(config.logging.filter, "kiosk=info");
    }

    #[test]
    fn non_http_launch_url_is_rejected() {
        let mut config = KioskConfig::default();
        config.browser.launch_url = "file:///etc/passwd".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_product_is_rejected() {
        let mut config = KioskConfig::default();
        config.browser.product.clear();
        assert!(config.validate().is_err());
    }
}
