//! Volume handlers. Platforms without audio control answer an immediate
//! `FAILED` with an empty result; everything else follows the
//! `PENDING`-then-`OK` pattern of an asynchronous platform call.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use kiosk_protocol::{Request, Response, Status};

use crate::session::HostSession;

/// `APP GETVOLUME` — report the active output device's volume and mute
/// state, stringified into the result field.
pub(crate) async fn get_volume(session: &Arc<HostSession>, request: &Request) {
    let audio = match &session.platform.audio {
        Some(audio) => Arc::clone(audio),
        None => {
            session.respond(Response::of(request, Status::Failed));
            return;
        }
    };

    session.respond(Response::of(request, Status::Pending));
    match audio.output_devices().await {
        Ok(devices) => {
            let mut volume = json!({});
            for device in devices.iter().filter(|d| d.is_active) {
                volume = json!({"volume": device.volume, "isMuted": device.is_muted});
            }
            let result = serde_json::to_string(&volume).unwrap_or_default();
            session.respond(Response::of(request, Status::Ok).with_result(result));
        }
        Err(e) => {
            warn!(error = %e, "audio enumeration failed");
            session.respond(Response::of(request, Status::Fail).with_message(e.to_string()));
        }
    }
}

/// `APP SETVOLUME` — apply the caller's property object to every active
/// output device. One `OK` per device that accepts the properties.
pub(crate) async fn set_volume(session: &Arc<HostSession>, request: &Request, props: &Value) {
    let audio = match &session.platform.audio {
        Some(audio) => Arc::clone(audio),
        None => {
            session.respond(Response::of(request, Status::Failed));
            return;
        }
    };

    session.respond(Response::of(request, Status::Pending));
    let devices = match audio.output_devices().await {
        Ok(devices) => devices,
        Err(e) => {
            warn!(error = %e, "audio enumeration failed");
            session.respond(Response::of(request, Status::Fail).with_message(e.to_string()));
            return;
        }
    };

    for device in devices.iter().filter(|d| d.is_active) {
        match audio.set_properties(&device.id, props).await {
            Ok(()) => session.respond(Response::of(request, Status::Ok)),
            Err(e) => {
                warn!(device = %device.id, error = %e, "set properties failed");
                session.respond(Response::of(request, Status::Fail).with_message(e.to_string()));
            }
        }
    }
}
