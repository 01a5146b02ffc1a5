//! Speech synthesis handlers: voice enumeration, utterance playback, and the
//! progress listeners that reclassify engine events into status pushes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use kiosk_platform::TtsEvent;
use kiosk_protocol::{PlaybackStatus, Request, Response, SpeakOptions, Status};

use crate::session::HostSession;

/// Command name used for status pushes while an utterance plays.
const STATUS_COMMAND: &str = "TTS STATUS";
/// Command name used for word-boundary pushes.
const WORD_COMMAND: &str = "TTS WORD";

/// Grace window before a terminal event between chunks is reported as a full
/// stop. A start event inside the window means it was only a chunk boundary.
const CHUNK_STOP_GRACE: Duration = Duration::from_secs(1);

/// `TTS INIT` — answer `PENDING`, then `OK` with the comma-joined voice
/// names once the engine reports them.
pub(crate) async fn init(session: &Arc<HostSession>, request: &Request) {
    session.respond(Response::of(request, Status::Pending));
    match session.platform.speech.voices().await {
        Ok(voices) => {
            let names: Vec<&str> = voices.iter().map(|v| v.name.as_str()).collect();
            session.respond(Response::of(request, Status::Ok).with_result(names.join(",")));
        }
        Err(e) => {
            warn!(error = %e, "voice enumeration failed");
            session.respond(Response::of(request, Status::Fail).with_message(e.to_string()));
        }
    }
}

/// `TTS INITWITHHACK` — speak an inaudible calibration utterance first.
///
/// Some engines return no useful data until `speak` has been called once, so
/// the real INIT runs on the calibration utterance's terminal event. Only a
/// `PENDING` is sent here; INIT's own responses follow asynchronously.
pub(crate) fn init_with_hack(session: &Arc<HostSession>, request: &Request) {
    let options = SpeakOptions {
        lang: Some("en-US".to_string()),
        volume: Some(0.01),
        ..Default::default()
    };
    let (events, mut rx) = mpsc::channel(16);
    if let Err(e) = session.platform.speech.speak("ready", &options, events) {
        warn!(error = %e, "calibration utterance failed");
    }
    session.respond(Response::of(request, Status::Pending));

    let session = Arc::clone(session);
    let request = request.clone();
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if event.is_terminal() {
                init(&session, &request).await;
                break;
            }
        }
    });
}

/// `TTS SPEAK` — submit one utterance and stream status/word pushes as it
/// plays. Answers `OK` as soon as the utterance is submitted.
pub(crate) fn speak(
    session: &Arc<HostSession>,
    request: &Request,
    text: &str,
    options: &SpeakOptions,
) {
    let (events, rx) = mpsc::channel(64);
    if let Err(e) = session.platform.speech.speak(text, options, events) {
        warn!(error = %e, "speak failed");
    }
    session.respond(Response::of(request, Status::Ok));
    tokio::spawn(progress_listener(
        Arc::clone(session),
        request.id,
        rx,
        None,
    ));
}

/// `TTS SPEAKCHUNKS` — queue a sequence of chunks back-to-back.
///
/// Chunks are enqueued rather than interrupting, and all of them feed one
/// progress listener. The listener defers terminal events by
/// [`CHUNK_STOP_GRACE`] so a chunk boundary is not reported as a full stop.
pub(crate) fn speak_chunks(
    session: &Arc<HostSession>,
    request: &Request,
    chunks: &[String],
    options: &SpeakOptions,
) {
    let options = SpeakOptions {
        enqueue: true,
        ..options.clone()
    };
    let (events, rx) = mpsc::channel(64);
    for chunk in chunks {
        if let Err(e) = session.platform.speech.speak(chunk, &options, events.clone()) {
            warn!(error = %e, "chunk submission failed");
        }
    }
    drop(events);
    session.respond(Response::of(request, Status::Ok));
    tokio::spawn(progress_listener(
        Arc::clone(session),
        request.id,
        rx,
        Some(CHUNK_STOP_GRACE),
    ));
}

pub(crate) fn stop(session: &Arc<HostSession>, request: &Request) {
    session.platform.speech.stop();
    session.respond(Response::of(request, Status::Ok));
}

pub(crate) fn pause(session: &Arc<HostSession>, request: &Request) {
    session.platform.speech.pause();
    session.respond(Response::of(request, Status::Ok));
}

pub(crate) fn resume(session: &Arc<HostSession>, request: &Request) {
    session.platform.speech.resume();
    session.respond(Response::of(request, Status::Ok));
}

/// `TTS STATUS` — report the cached playback status.
pub(crate) fn status(session: &Arc<HostSession>, request: &Request) {
    let status = session.playback_status().to_string();
    session.respond(Response::of(request, Status::Ok).with_result(status));
}

/// Reclassify engine events into status/word pushes.
///
/// With `stop_grace` set (SPEAKCHUNKS), a terminal event only schedules a
/// stop; the stop is finalized after the grace window unless a new chunk's
/// start event supersedes it first. That scheduled stop is the one timer in
/// the system that ever gets cancelled.
async fn progress_listener(
    session: Arc<HostSession>,
    request_id: u32,
    mut events: mpsc::Receiver<TtsEvent>,
    stop_grace: Option<Duration>,
) {
    let mut scheduled_stop: Option<JoinHandle<()>> = None;

    while let Some(event) = events.recv().await {
        match event {
            TtsEvent::Start | TtsEvent::Resume => {
                if let Some(handle) = scheduled_stop.take() {
                    // Start of the next chunk — the previous terminal event
                    // was only a boundary, suppress it.
                    handle.abort();
                } else {
                    session.set_playback_status(PlaybackStatus::Playing);
                    session.respond(Response::push(STATUS_COMMAND, request_id, "Playing"));
                }
            }
            TtsEvent::Pause => {
                session.set_playback_status(PlaybackStatus::Paused);
                session.respond(Response::push(STATUS_COMMAND, request_id, "Paused"));
            }
            TtsEvent::Word { char_index } => {
                session.respond(Response::push(WORD_COMMAND, request_id, char_index));
            }
            terminal => {
                debug_assert!(terminal.is_terminal());
                match stop_grace {
                    None => {
                        session.set_playback_status(PlaybackStatus::Stopped);
                        session.respond(Response::push(STATUS_COMMAND, request_id, "Stopped"));
                    }
                    Some(grace) => {
                        if let Some(handle) = scheduled_stop.take() {
                            handle.abort();
                        }
                        let session = Arc::clone(&session);
                        scheduled_stop = Some(tokio::spawn(async move {
                            tokio::time::sleep(grace).await;
                            session.set_playback_status(PlaybackStatus::Stopped);
                            session.respond(Response::push(STATUS_COMMAND, request_id, "Stopped"));
                        }));
                    }
                }
            }
        }
    }
    debug!(id = request_id, "utterance event stream closed");
}
