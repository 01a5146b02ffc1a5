//! App-level handlers: window, storage, power, accessibility, integrity.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::warn;

use kiosk_platform::AccessibilityFeature;
use kiosk_protocol::{Request, Response, Status};

use crate::session::HostSession;

/// `UI FULLSCREEN` — legacy no-op kept for compatibility with the old
/// extension protocol; the kiosk window is already fullscreen.
pub(crate) fn fullscreen(session: &Arc<HostSession>, request: &Request) {
    let echoed = serde_json::to_string(request).unwrap_or_default();
    session.respond(
        Response::of(request, Status::Ok)
            .with_result(echoed)
            .with_message("No-op"),
    );
}

/// `APP CLOSE` — tear the window down. No response: the content view is gone
/// before one could be delivered.
pub(crate) fn close(session: &Arc<HostSession>) {
    session.platform.window.close();
}

/// `APP STOREDATA` — store every property of the params object.
pub(crate) async fn store_data(
    session: &Arc<HostSession>,
    request: &Request,
    entries: Map<String, Value>,
) {
    match session.platform.storage.set(entries).await {
        Ok(()) => {
            let echoed = serde_json::to_string(request).unwrap_or_default();
            session.respond(
                Response::of(request, Status::Ok)
                    .with_result(echoed)
                    .with_message("Saved"),
            );
        }
        Err(e) => {
            warn!(error = %e, "store failed");
            session.respond(Response::of(request, Status::Fail).with_message(e.to_string()));
        }
    }
}

/// `APP CLEARDATA` — delete the given keys.
pub(crate) async fn clear_data(session: &Arc<HostSession>, request: &Request, keys: &[String]) {
    match session.platform.storage.remove(keys).await {
        Ok(()) => {
            let echoed = serde_json::to_string(request).unwrap_or_default();
            session.respond(
                Response::of(request, Status::Ok)
                    .with_result(echoed)
                    .with_message("Removed"),
            );
        }
        Err(e) => {
            warn!(error = %e, "clear failed");
            session.respond(Response::of(request, Status::Fail).with_message(e.to_string()));
        }
    }
}

/// `APP KEEPAWAKE` — request a prevent-sleep hold for the given reason, or
/// release the hold when no reason is supplied.
pub(crate) fn keep_awake(session: &Arc<HostSession>, request: &Request, reason: Option<&str>) {
    let outcome = match reason {
        Some(reason) => session
            .platform
            .power
            .request_keep_awake(reason)
            .map(|()| format!("Keep Awake set to {reason}")),
        None => session
            .platform
            .power
            .release_keep_awake()
            .map(|()| "Keep Awake Released".to_string()),
    };
    match outcome {
        Ok(message) => {
            session.respond(Response::of(request, Status::Ok).with_message(message));
        }
        Err(e) => {
            warn!(error = %e, "keep awake failed");
            session.respond(
                Response::of(request, Status::Fail)
                    .with_message("Error occurred while setting Keep Awake"),
            );
        }
    }
}

/// `APP SPOKEN_FEEDBACK` — toggle the spoken-feedback accessibility feature.
/// An absent param forces it off.
pub(crate) fn spoken_feedback(session: &Arc<HostSession>, request: &Request, enabled: bool) {
    match session
        .platform
        .accessibility
        .set_enabled(AccessibilityFeature::SpokenFeedback, enabled)
    {
        Ok(()) => {
            session.respond(
                Response::of(request, Status::Ok).with_message("Spoken feedback changed"),
            );
        }
        Err(e) => {
            warn!(error = %e, "spoken feedback toggle failed");
            session.respond(
                Response::of(request, Status::Fail)
                    .with_message("Error occurred while changing spoken feedback"),
            );
        }
    }
}

/// `BROWSER HASH` — forward the message to the integrity module and reply
/// with its digest.
pub(crate) async fn browser_hash(session: &Arc<HostSession>, request: &Request, message: &str) {
    match session.platform.integrity.digest(message).await {
        Ok(digest) => {
            session.respond(Response::of(request, Status::Ok).with_message(digest));
        }
        Err(e) => {
            warn!(error = %e, "integrity digest failed");
            session.respond(Response::of(request, Status::Fail).with_message(e.to_string()));
        }
    }
}
