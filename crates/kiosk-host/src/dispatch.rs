//! Envelope validation and command dispatch.

use std::sync::Arc;

use tracing::{debug, warn};

use kiosk_common::new_request_id;
use kiosk_protocol::{Command, CommandEnvelope, CommandParseError, Request, Response, Status};

use crate::handlers;
use crate::session::HostSession;

impl HostSession {
    /// Handle one raw window message from the content view.
    ///
    /// Messages without the `CHROME COMMAND` marker are ignored. Recognized
    /// commands get a synthesized request id and run to completion; unknown
    /// commands are answered with a single `FAIL`. The dispatcher does not
    /// validate `params` shape — that is each handler's business (or,
    /// faithfully, lack of it).
    pub async fn handle_message(self: &Arc<Self>, raw: &str) {
        let envelope = match CommandEnvelope::from_json(raw) {
            Some(env) => env,
            None => {
                debug!(body_len = raw.len(), "message dropped: not an envelope");
                return;
            }
        };
        if !envelope.is_command() {
            debug!(kind = %envelope.kind, "message dropped: no command marker");
            return;
        }

        let request = Request::new(
            envelope.command.clone(),
            envelope.params.clone(),
            new_request_id(),
        );

        match Command::parse(&envelope.command, &envelope.params, envelope.message.as_deref()) {
            Ok(command) => {
                debug!(command = %request.command, id = request.id, "dispatch");
                self.execute(&request, command).await;
            }
            Err(CommandParseError::Unknown(name)) => {
                warn!(command = %name, "unknown command");
                self.respond(
                    Response::of(&request, Status::Fail).with_message("Unknown command"),
                );
            }
            Err(CommandParseError::MissingParams(name)) => {
                // Known quirk: these commands return without any response
                // when params are missing.
                debug!(command = %name, "dropped: missing params");
            }
        }
    }

    async fn execute(self: &Arc<Self>, request: &Request, command: Command) {
        match command {
            Command::TtsInit => handlers::tts::init(self, request).await,
            Command::TtsInitWithHack => handlers::tts::init_with_hack(self, request),
            Command::TtsSpeak { text, options } => {
                handlers::tts::speak(self, request, &text, &options);
            }
            Command::TtsSpeakChunks { chunks, options } => {
                handlers::tts::speak_chunks(self, request, &chunks, &options);
            }
            Command::TtsStop => handlers::tts::stop(self, request),
            Command::TtsPause => handlers::tts::pause(self, request),
            Command::TtsResume => handlers::tts::resume(self, request),
            Command::TtsStatus => handlers::tts::status(self, request),
            Command::UiFullscreen => handlers::app::fullscreen(self, request),
            Command::AppClose => handlers::app::close(self),
            Command::AppStoreData(entries) => {
                handlers::app::store_data(self, request, entries).await;
            }
            Command::AppClearData(keys) => handlers::app::clear_data(self, request, &keys).await,
            Command::AppGetVolume => handlers::volume::get_volume(self, request).await,
            Command::AppSetVolume(props) => {
                handlers::volume::set_volume(self, request, &props).await;
            }
            Command::ConnectExtension(ids) => {
                handlers::connect::connect_extensions(self, request, ids).await;
            }
            Command::AppKeepAwake(reason) => {
                handlers::app::keep_awake(self, request, reason.as_deref());
            }
            Command::AppSpokenFeedback(enabled) => {
                handlers::app::spoken_feedback(self, request, enabled);
            }
            Command::BrowserHash(message) => {
                handlers::app::browser_hash(self, request, &message).await;
            }
        }
    }
}
