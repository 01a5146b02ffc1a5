//! Wire protocol between the host shell and the embedded content view.
//!
//! Messages flow in both directions as window-level structured messages:
//! - **Content view -> host**: `{type: "CHROME COMMAND", command, params}`.
//! - **Host -> content view**: `{type: "CHROME RESPONSE", command, id,
//!   params, status, result, message}`.
//!
//! The command set is fixed and closed — there is deliberately no discovery,
//! versioning, or schema validation of `params`; each handler interprets its
//! own payload.

pub mod command;
pub mod envelope;
pub mod status;

pub use command::{Command, CommandParseError, SpeakOptions};
pub use envelope::{
    CommandEnvelope, Request, Response, ResponseEnvelope, COMMAND_ENVELOPE_TYPE,
    RESPONSE_ENVELOPE_TYPE,
};
pub use status::{PlaybackStatus, Status};
