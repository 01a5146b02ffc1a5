//! Extension connection orchestration.
//!
//! For each requested extension id the host opens a channel, records it in
//! the session's connection map, asks the extension for its inject script,
//! and races the first reply against a fixed deadline. All attempts are then
//! joined; the caller gets one aggregate outcome listing either every id
//! (all replied) or exactly the ids that timed out.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use kiosk_platform::{ChannelRequest, ExtensionChannel, ExtensionMessage};

use crate::session::HostSession;

/// How long each extension gets to answer the inject-script request.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reply name for an init-script payload; any other reply carries a script
/// to execute immediately against the content view.
const INIT_SCRIPTS_REPLY: &str = "ext_getInitScripts";

/// A script an extension wants injected into every page the content view
/// loads, keyed by the extension that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitScript {
    pub name: String,
    pub matches: Vec<String>,
    pub js: InitScriptCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitScriptCode {
    pub code: String,
}

impl InitScript {
    fn for_extension(extension_id: &str, code: String) -> Self {
        Self {
            name: format!("initScripts-{extension_id}"),
            matches: vec!["<all_urls>".to_string()],
            js: InitScriptCode { code },
        }
    }
}

/// Outcome of one orchestrated connect fan-out.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConnectOutcome {
    /// Ids whose channel replied within the deadline, in settle order.
    pub connected: Vec<String>,
    /// Ids whose channel did not reply within the deadline, in settle order.
    pub failed: Vec<String>,
}

impl ConnectOutcome {
    pub fn all_connected(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Fan out to every requested extension and join all attempts.
///
/// A synchronous `connect` failure registers no attempt at all: the id shows
/// up in neither outcome list and the expected completion count shrinks by
/// one.
pub(crate) async fn connect_all(session: &Arc<HostSession>, ids: &[String]) -> ConnectOutcome {
    let mut attempts: JoinSet<Result<String, String>> = JoinSet::new();
    for id in ids {
        if let Some(channel) = open_channel(session, id) {
            let session = Arc::clone(session);
            let id = id.clone();
            attempts.spawn(async move { race_first_reply(session, id, channel).await });
        }
    }

    let mut outcome = ConnectOutcome::default();
    while let Some(settled) = attempts.join_next().await {
        match settled {
            Ok(Ok(id)) => {
                debug!(extension = %id, "extension connected");
                outcome.connected.push(id);
            }
            Ok(Err(id)) => {
                warn!(extension = %id, "extension connect timed out");
                outcome.failed.push(id);
            }
            Err(e) => warn!(error = %e, "connect attempt panicked"),
        }
    }
    outcome
}

/// Open the channel, register it in the connection map, and send the
/// inject-script request. Returns `None` when the open call itself fails.
fn open_channel(session: &Arc<HostSession>, extension_id: &str) -> Option<ExtensionChannel> {
    let channel = match session.platform.extensions.connect(extension_id) {
        Ok(channel) => channel,
        Err(e) => {
            error!(extension = %extension_id, error = %e, "could not connect to extension");
            return None;
        }
    };

    if let Ok(mut connections) = session.connections.lock() {
        connections.insert(extension_id.to_string(), channel.requests.clone());
    }

    if let Err(e) = channel.requests.try_send(ChannelRequest::inject_script()) {
        warn!(extension = %extension_id, error = %e, "inject-script request not sent");
    }
    Some(channel)
}

/// Race the first reply against [`CONNECT_TIMEOUT`]; hand the channel over
/// to the long-lived service loop either way (late replies still execute).
async fn race_first_reply(
    session: Arc<HostSession>,
    extension_id: String,
    mut channel: ExtensionChannel,
) -> Result<String, String> {
    match tokio::time::timeout(CONNECT_TIMEOUT, channel.messages.recv()).await {
        Ok(Some(message)) => {
            handle_extension_message(&session, &extension_id, message);
            tokio::spawn(service_channel(session, extension_id.clone(), channel.messages));
            Ok(extension_id)
        }
        Ok(None) => {
            // Remote disconnected before replying.
            remove_connection(&session, &extension_id);
            Err(extension_id)
        }
        Err(_) => {
            tokio::spawn(service_channel(session, extension_id.clone(), channel.messages));
            Err(extension_id)
        }
    }
}

/// Keep handling messages until the remote side disconnects, then drop the
/// connection-map entry.
async fn service_channel(
    session: Arc<HostSession>,
    extension_id: String,
    mut messages: mpsc::Receiver<ExtensionMessage>,
) {
    while let Some(message) = messages.recv().await {
        handle_extension_message(&session, &extension_id, message);
    }
    debug!(extension = %extension_id, "extension disconnected");
    remove_connection(&session, &extension_id);
}

fn handle_extension_message(
    session: &Arc<HostSession>,
    extension_id: &str,
    message: ExtensionMessage,
) {
    debug!(extension = %extension_id, name = %message.name, "extension message");
    if message.name == INIT_SCRIPTS_REPLY {
        if let Ok(mut scripts) = session.init_scripts.lock() {
            scripts.push(InitScript::for_extension(extension_id, message.code));
        }
    } else {
        session.view.execute_script(&message.code);
    }
}

fn remove_connection(session: &Arc<HostSession>, extension_id: &str) {
    if let Ok(mut connections) = session.connections.lock() {
        connections.remove(extension_id);
    }
}
