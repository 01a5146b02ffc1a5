use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use kiosk_common::PlatformError;

/// Request sent from the host to a companion extension over its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRequest {
    pub request: String,
}

impl ChannelRequest {
    /// Every connect-ready extension implements `injectScript` and replies
    /// with the script the host should run in the content view.
    pub fn inject_script() -> Self {
        Self {
            request: "injectScript".to_string(),
        }
    }
}

/// Message received from an extension. `ext_getInitScripts` replies carry an
/// init script; anything else carries a script to execute immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMessage {
    pub name: String,
    pub code: String,
}

/// A bidirectional pipe to one extension process.
///
/// The incoming stream ending means the remote side disconnected; holders of
/// the outgoing sender observe the same via send failures.
pub struct ExtensionChannel {
    pub requests: mpsc::Sender<ChannelRequest>,
    pub messages: mpsc::Receiver<ExtensionMessage>,
}

/// Opens channels to extension processes.
///
/// `connect` may fail synchronously (bad id, extension not installed); the
/// orchestrator catches and skips such failures.
pub trait ExtensionTransport: Send + Sync {
    fn connect(&self, extension_id: &str) -> Result<ExtensionChannel, PlatformError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_script_request_shape() {
        let req = ChannelRequest::inject_script();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"request": "injectScript"}));
    }

    #[test]
    fn extension_message_round_trips() {
        let msg = ExtensionMessage {
            name: "ext_getInitScripts".into(),
            code: "window.__ext = true;".into(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: ExtensionMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
