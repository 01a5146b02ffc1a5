//! `CONNECT EXTENSION` — fan out to the orchestrator and map the joined
//! outcome onto one aggregate response.

use std::sync::Arc;

use serde_json::json;

use kiosk_protocol::{Request, Response, Status};

use crate::extensions;
use crate::session::HostSession;

pub(crate) async fn connect_extensions(
    session: &Arc<HostSession>,
    request: &Request,
    ids: Vec<String>,
) {
    let outcome = extensions::connect_all(session, &ids).await;

    let response = if outcome.all_connected() {
        // On full success the confirmation lists every requested id.
        Response::of(request, Status::Ok)
            .with_result(json!(ids))
            .with_message("Successfully connected to all extensions")
    } else {
        Response::of(request, Status::Fail)
            .with_result(json!(outcome.failed))
            .with_message("Unable to connect to extension")
    };
    session.respond(response);
}
