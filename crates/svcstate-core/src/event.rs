//! Events fed to the status reducer and their JSON wire form.
//!
//! One event per line:
//!
//! ```text
//! {"kind":"change_host","host":"wss://10.0.0.2:55400"}
//! {"kind":"incoming_message","origin":"daemon","command":"register_service","data":{}}
//! {"kind":"outgoing_message","command":"exit","destination":"daemon"}
//! {"kind":"transport_disconnected"}
//! ```

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Something that happened on the daemon connection.
///
/// Origins, commands and destinations are kept as raw wire strings; the
/// reducer resolves them against its service directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The user pointed the client at a different daemon.
    ChangeHost { host: String },

    /// A message arrived from the daemon or one of its services.
    IncomingMessage {
        origin: String,
        command: String,
        #[serde(default = "empty_object")]
        data: Value,
    },

    /// A message was sent by this client.
    OutgoingMessage { command: String, destination: String },

    /// The transport connection closed.
    TransportDisconnected,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Event {
    pub fn change_host(host: impl Into<String>) -> Self {
        Event::ChangeHost { host: host.into() }
    }

    pub fn incoming(origin: impl Into<String>, command: impl Into<String>, data: Value) -> Self {
        Event::IncomingMessage {
            origin: origin.into(),
            command: command.into(),
            data,
        }
    }

    pub fn outgoing(command: impl Into<String>, destination: impl Into<String>) -> Self {
        Event::OutgoingMessage {
            command: command.into(),
            destination: destination.into(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ChangeHost { .. } => "change_host",
            Event::IncomingMessage { .. } => "incoming_message",
            Event::OutgoingMessage { .. } => "outgoing_message",
            Event::TransportDisconnected => "transport_disconnected",
        }
    }

    /// Decode a single event from its JSON form.
    pub fn from_json(s: &str) -> Result<Self, EventDecodeError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Errors from decoding the event wire form.
#[derive(Debug, thiserror::Error)]
pub enum EventDecodeError {
    #[error("invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid event on line {line}: {source}")]
    Line {
        line: usize,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode a newline-delimited stream of events.
///
/// Blank lines and lines starting with `#` are skipped. Decoding stops at the
/// first malformed line.
pub fn decode_stream<R: BufRead>(reader: R) -> Result<Vec<Event>, EventDecodeError> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(trimmed).map_err(|source| EventDecodeError::Line {
            line: idx + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_each_kind() {
        assert_eq!(
            Event::from_json(r#"{"kind":"change_host","host":"wss://h:1"}"#).unwrap(),
            Event::change_host("wss://h:1")
        );
        assert_eq!(
            Event::from_json(
                r#"{"kind":"incoming_message","origin":"daemon","command":"start_service","data":{"service":"chia_wallet"}}"#
            )
            .unwrap(),
            Event::incoming("daemon", "start_service", json!({"service": "chia_wallet"}))
        );
        assert_eq!(
            Event::from_json(r#"{"kind":"outgoing_message","command":"exit","destination":"daemon"}"#)
                .unwrap(),
            Event::outgoing("exit", "daemon")
        );
        assert_eq!(
            Event::from_json(r#"{"kind":"transport_disconnected"}"#).unwrap(),
            Event::TransportDisconnected
        );
    }

    #[test]
    fn test_missing_data_defaults_to_empty_object() {
        let event =
            Event::from_json(r#"{"kind":"incoming_message","origin":"chia_wallet","command":"ping"}"#)
                .unwrap();
        assert_eq!(event, Event::incoming("chia_wallet", "ping", json!({})));
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let err = Event::from_json(r#"{"kind":"reboot"}"#).unwrap_err();
        assert!(matches!(err, EventDecodeError::Json(_)));
    }

    #[test]
    fn test_serialized_form_uses_kind_tag() {
        let value = serde_json::to_value(Event::TransportDisconnected).unwrap();
        assert_eq!(value, json!({"kind": "transport_disconnected"}));
    }

    #[test]
    fn test_decode_stream_skips_blank_and_comment_lines() {
        let input = "\
# session start
{\"kind\":\"incoming_message\",\"origin\":\"daemon\",\"command\":\"register_service\"}

{\"kind\":\"transport_disconnected\"}
";
        let events = decode_stream(input.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), "incoming_message");
        assert_eq!(events[1], Event::TransportDisconnected);
    }

    #[test]
    fn test_decode_stream_reports_line_number() {
        let input = "{\"kind\":\"transport_disconnected\"}\n\nnot json\n";
        let err = decode_stream(input.as_bytes()).unwrap_err();
        assert!(matches!(err, EventDecodeError::Line { line: 3, .. }));
        assert!(err.to_string().starts_with("invalid event on line 3"));
    }
}
