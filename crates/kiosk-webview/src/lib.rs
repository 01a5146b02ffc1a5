//! `wry` integration for the kiosk shell.
//!
//! Three pieces: the JS bridge injected into every page (forwards
//! `CHROME COMMAND` window messages to the native side and delivers
//! `CHROME RESPONSE` envelopes back), the [`ViewProxy`] that lets the async
//! dispatch core drive the webview from any task, and the [`ContentShell`]
//! that owns the `wry::WebView` on the event-loop thread.

pub mod bridge;
pub mod shell;
pub mod user_agent;
pub mod view;

pub use bridge::{welcome_script, BRIDGE_INIT_SCRIPT, WELCOME_MARKER_CLASS};
pub use shell::{ContentShell, ShellConfig, ShellError};
pub use user_agent::UserAgent;
pub use view::{ViewCommand, ViewProxy};
