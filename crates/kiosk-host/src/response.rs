//! The response channel: serializes response records into the outbound
//! envelope and delivers them to the content view.

use std::sync::Arc;

use tracing::debug;

use kiosk_protocol::{Response, ResponseEnvelope};

/// The embedded content view, as far as the host needs it: a message target
/// for response envelopes and a script-execution surface for extension code.
pub trait ContentView: Send + Sync {
    fn post_message(&self, envelope: &ResponseEnvelope);
    fn execute_script(&self, code: &str);
}

/// Posts correlated responses back to the content view.
///
/// Callers do not need to know whether a record is the first or a later
/// response for its request id; every record is delivered in full, tagged
/// with the fixed envelope type.
#[derive(Clone)]
pub struct ResponseChannel {
    view: Arc<dyn ContentView>,
}

impl ResponseChannel {
    pub fn new(view: Arc<dyn ContentView>) -> Self {
        Self { view }
    }

    pub fn send(&self, response: Response) {
        debug!(
            command = %response.command,
            id = response.id,
            status = ?response.status,
            "response"
        );
        self.view.post_message(&ResponseEnvelope::new(response));
    }
}
