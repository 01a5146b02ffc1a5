use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::status::Status;

/// Envelope tag on inbound messages from the content view.
pub const COMMAND_ENVELOPE_TYPE: &str = "CHROME COMMAND";
/// Envelope tag on outbound messages to the content view.
pub const RESPONSE_ENVELOPE_TYPE: &str = "CHROME RESPONSE";

/// Inbound structured message from the content view.
///
/// Only messages whose `type` field is `"CHROME COMMAND"` are dispatched;
/// anything else on the window message channel is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
    #[serde(default)]
    pub params: Value,
    /// Extra payload used only by `BROWSER HASH`, which carries its input in
    /// `message` rather than `params`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandEnvelope {
    /// Parse an envelope from a raw JSON string. Malformed messages yield
    /// `None` and are dropped by the dispatcher.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Whether this message carries the command marker.
    pub fn is_command(&self) -> bool {
        self.kind == COMMAND_ENVELOPE_TYPE
    }
}

/// A dispatched request: the raw wire command plus a synthesized id.
///
/// The id is random in a bounded range, not guaranteed unique; it is echoed
/// back in every response tied to this request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub command: String,
    pub params: Value,
    pub id: u32,
}

impl Request {
    pub fn new(command: impl Into<String>, params: Value, id: u32) -> Self {
        Self {
            command: command.into(),
            params,
            id,
        }
    }
}

/// One response record. A single request may produce zero, one, or several
/// of these over time (e.g. `PENDING` first, `OK` when the platform call
/// completes, then status pushes as an utterance plays).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub command: String,
    pub id: u32,
    pub params: Value,
    pub status: Status,
    pub result: Value,
    pub message: String,
}

impl Response {
    /// A response echoing a request, with empty result and message.
    pub fn of(request: &Request, status: Status) -> Self {
        Self {
            command: request.command.clone(),
            id: request.id,
            params: request.params.clone(),
            status,
            result: Value::String(String::new()),
            message: String::new(),
        }
    }

    pub fn with_result(mut self, result: impl Into<Value>) -> Self {
        self.result = result.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// A status/word push not tied to the request's own command name
    /// (e.g. `TTS STATUS` pushes emitted while a `TTS SPEAK` plays).
    pub fn push(command: impl Into<String>, id: u32, result: impl Into<Value>) -> Self {
        Self {
            command: command.into(),
            id,
            params: Value::String(String::new()),
            status: Status::Ok,
            result: result.into(),
            message: String::new(),
        }
    }
}

/// Outbound structured message: a response record tagged with the fixed
/// envelope type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub response: Response,
}

impl ResponseEnvelope {
    pub fn new(response: Response) -> Self {
        Self {
            kind: RESPONSE_ENVELOPE_TYPE.to_string(),
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_command_envelope() {
        let raw = r#"{"type":"CHROME COMMAND","command":"TTS STOP","params":null}"#;
        let env = CommandEnvelope::from_json(raw).unwrap();
        assert!(env.is_command());
        assert_eq!(env.command, "TTS STOP");
        assert!(env.params.is_null());
    }

    #[test]
    fn params_field_is_optional() {
        let raw = r#"{"type":"CHROME COMMAND","command":"TTS STATUS"}"#;
        let env = CommandEnvelope::from_json(raw).unwrap();
        assert!(env.params.is_null());
    }

    #[test]
    fn non_command_marker_detected() {
        let raw = r#"{"type":"something else","command":"TTS STOP"}"#;
        let env = CommandEnvelope::from_json(raw).unwrap();
        assert!(!env.is_command());
    }

    #[test]
    fn malformed_json_yields_none() {
        assert!(CommandEnvelope::from_json("{not json").is_none());
        assert!(CommandEnvelope::from_json("").is_none());
    }

    #[test]
    fn hash_envelope_carries_message() {
        let raw = r#"{"type":"CHROME COMMAND","command":"BROWSER HASH","message":"abc123"}"#;
        let env = CommandEnvelope::from_json(raw).unwrap();
        assert_eq!(env.message.as_deref(), Some("abc123"));
    }

    #[test]
    fn response_envelope_shape() {
        let request = Request::new("TTS STATUS", Value::Null, 42);
        let response = Response::of(&request, Status::Ok).with_result("Stopped");
        let env = ResponseEnvelope::new(response);

        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["type"], "CHROME RESPONSE");
        assert_eq!(value["command"], "TTS STATUS");
        assert_eq!(value["id"], 42);
        assert_eq!(value["status"], "OK");
        assert_eq!(value["result"], "Stopped");
        assert_eq!(value["message"], "");
    }

    #[test]
    fn response_echoes_request_params() {
        let request = Request::new("APP STOREDATA", json!({"a": 1}), 7);
        let response = Response::of(&request, Status::Ok).with_message("Saved");
        assert_eq!(response.params, json!({"a": 1}));
        assert_eq!(response.message, "Saved");
    }

    #[test]
    fn push_response_has_blank_params() {
        let push = Response::push("TTS WORD", 9, 17);
        assert_eq!(push.command, "TTS WORD");
        assert_eq!(push.id, 9);
        assert_eq!(push.status, Status::Ok);
        assert_eq!(push.result, json!(17));
        assert_eq!(push.params, json!(""));
    }

    #[test]
    fn response_round_trips() {
        let request = Request::new("CONNECT EXTENSION", json!(["a", "b"]), 3);
        let response = Response::of(&request, Status::Fail)
            .with_result(json!(["b"]))
            .with_message("Unable to connect to extension");
        let json = serde_json::to_string(&response).unwrap();
        let back: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, Status::Fail);
        assert_eq!(back.result, json!(["b"]));
    }
}
