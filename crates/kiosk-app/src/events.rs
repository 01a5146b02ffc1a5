//! User events delivered to the winit event loop from tokio tasks.

use kiosk_webview::ViewCommand;

#[derive(Debug)]
pub enum ShellEvent {
    /// A deferred webview operation queued by the dispatch core.
    View(ViewCommand),
    /// `APP CLOSE` asked for window teardown.
    CloseRequested,
}
