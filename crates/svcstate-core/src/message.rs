//! Daemon protocol commands and loosely-typed payload access.

use std::fmt;

use serde_json::Value;

/// A command name carried by a daemon protocol message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RegisterService,
    StartService,
    StopService,
    Ping,
    IsRunning,
    GetCertPaths,
    Exit,
    /// Any command this crate does not act on.
    Other(String),
}

impl Command {
    /// Parse a wire command name. Never fails.
    pub fn parse(s: &str) -> Self {
        match s {
            "register_service" => Command::RegisterService,
            "start_service" => Command::StartService,
            "stop_service" => Command::StopService,
            "ping" => Command::Ping,
            "is_running" => Command::IsRunning,
            "get_cert_paths" => Command::GetCertPaths,
            "exit" => Command::Exit,
            other => Command::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Command::RegisterService => "register_service",
            Command::StartService => "start_service",
            Command::StopService => "stop_service",
            Command::Ping => "ping",
            Command::IsRunning => "is_running",
            Command::GetCertPaths => "get_cert_paths",
            Command::Exit => "exit",
            Command::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read a string field from a message payload.
///
/// Returns `None` when the payload is not an object, the key is missing, or
/// the value is not a string.
pub fn str_field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

/// Read a field from a message payload as a flag.
///
/// Payload flags are loosely typed on the wire. `false`, `0`, `""`, `null`
/// and a missing key read as false; every other value reads as true.
pub fn flag(data: &Value, key: &str) -> bool {
    match data.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
