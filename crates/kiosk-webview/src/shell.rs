//! The event-loop side of the content view: owns the `wry::WebView` and
//! applies the commands queued by [`ViewProxy`](crate::view::ViewProxy).

use tracing::{debug, warn};
use wry::raw_window_handle::HasWindowHandle;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::bridge::BRIDGE_INIT_SCRIPT;
use crate::view::ViewCommand;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("webview error: {0}")]
    WebView(#[from] wry::Error),
}

/// Creation parameters for the embedded content view.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Initial URL to load.
    pub url: String,
    /// Full user-agent string, or the platform default when `None`.
    pub user_agent: Option<String>,
    /// Devtools are only wired up in debug builds.
    pub devtools: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            user_agent: None,
            devtools: cfg!(debug_assertions),
        }
    }
}

/// The embedded content view. Lives on the event-loop thread.
pub struct ContentShell {
    webview: WebView,
}

impl ContentShell {
    /// Build the webview as a child of `window`, covering `bounds`.
    ///
    /// `on_message` receives every raw payload the injected bridge forwards
    /// from the page; `on_load` fires when a page finishes loading. Media
    /// autoplay is enabled so spoken-response content can play without a
    /// gesture; there is no other permission surface to open.
    pub fn create<W: HasWindowHandle>(
        window: &W,
        bounds: wry::Rect,
        config: &ShellConfig,
        on_message: impl Fn(String) + 'static,
        on_load: impl Fn() + 'static,
    ) -> Result<Self, ShellError> {
        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_autoplay(true)
            .with_focused(true)
            .with_initialization_script(BRIDGE_INIT_SCRIPT)
            .with_ipc_handler(move |request| on_message(request.body().to_string()))
            .with_on_page_load_handler(move |event, url| {
                if matches!(event, PageLoadEvent::Finished) {
                    debug!(url = %url, "page loaded");
                    on_load();
                }
            })
            .with_url(&config.url);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        let webview = builder.build_as_child(window)?;
        debug!(url = %config.url, "content view created");
        Ok(Self { webview })
    }

    /// Apply one queued view command. Failures are logged, not propagated:
    /// a script that cannot be evaluated must not take the shell down.
    pub fn apply(&self, command: &ViewCommand) {
        let outcome = match command {
            ViewCommand::RunScript(code) => self.webview.evaluate_script(code),
            ViewCommand::LoadUrl(url) => self.webview.load_url(url),
        };
        if let Err(e) = outcome {
            warn!(error = %e, "view command failed");
        }
    }

    /// Track the parent window: called with the new size on every bounds
    /// change.
    pub fn set_bounds(&self, bounds: wry::Rect) {
        if let Err(e) = self.webview.set_bounds(bounds) {
            warn!(error = %e, "bounds update failed");
        }
    }
}
