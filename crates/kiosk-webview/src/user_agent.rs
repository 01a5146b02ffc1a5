//! User-agent construction.
//!
//! Every request the content view makes must carry the secure-browser
//! product token so the assessment server can verify it is talking to the
//! shell and not a plain browser.

/// Base UA the shell impersonates; the product token is appended to it.
pub const BASE_USER_AGENT: &str = "Mozilla/5.0 (X11; CrOS aarch64 14989.85.0) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";

/// Builds `<base> <product>/<version>[ (BETA)]`.
#[derive(Debug, Clone)]
pub struct UserAgent {
    product: String,
    version: String,
    dev_build: bool,
}

impl UserAgent {
    pub fn new(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
            dev_build: false,
        }
    }

    /// Dev builds advertise themselves with a ` (BETA)` suffix.
    pub fn dev_build(mut self, dev: bool) -> Self {
        self.dev_build = dev;
        self
    }

    pub fn build(&self) -> String {
        let suffix = if self.dev_build { " (BETA)" } else { "" };
        format!(
            "{BASE_USER_AGENT} {}/{}{suffix}",
            self.product, self.version
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_build_has_no_suffix() {
        let ua = UserAgent::new("CAISecureBrowser", "12.5.0").build();
        assert!(ua.starts_with("Mozilla/5.0 (X11; CrOS"));
        assert!(ua.ends_with("CAISecureBrowser/12.5.0"));
        assert!(!ua.contains("BETA"));
    }

    #[test]
    fn dev_build_is_marked_beta() {
        let ua = UserAgent::new("CAISecureBrowser", "12.5.0")
            .dev_build(true)
            .build();
        assert!(ua.ends_with("CAISecureBrowser/12.5.0 (BETA)"));
    }
}
