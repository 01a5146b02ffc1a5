//! Task-side handle to the content view.
//!
//! The `wry::WebView` lives on the event-loop thread and is not `Send`; the
//! dispatch core runs on the tokio runtime. [`ViewProxy`] bridges the two: it
//! implements the host's [`ContentView`] seam by queueing [`ViewCommand`]s
//! for the event-loop thread to apply against the real webview.

use tokio::sync::mpsc;
use tracing::warn;

use kiosk_host::ContentView;
use kiosk_protocol::ResponseEnvelope;

use crate::bridge::post_response_script;

/// One deferred operation against the webview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    RunScript(String),
    LoadUrl(String),
}

/// Cloneable, thread-safe sender half of the view channel.
#[derive(Clone)]
pub struct ViewProxy {
    commands: mpsc::UnboundedSender<ViewCommand>,
}

impl ViewProxy {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ViewCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { commands: tx }, rx)
    }

    pub fn run_script(&self, code: impl Into<String>) {
        self.send(ViewCommand::RunScript(code.into()));
    }

    pub fn load_url(&self, url: impl Into<String>) {
        self.send(ViewCommand::LoadUrl(url.into()));
    }

    fn send(&self, command: ViewCommand) {
        if self.commands.send(command).is_err() {
            warn!("view command dropped: event loop gone");
        }
    }
}

impl ContentView for ViewProxy {
    fn post_message(&self, envelope: &ResponseEnvelope) {
        self.run_script(post_response_script(envelope));
    }

    fn execute_script(&self, code: &str) {
        self.run_script(code);
    }
}
