//! Event fixtures using the default service identifiers.

use serde_json::{Value, json};
use svcstate_core::Event;

pub const DAEMON: &str = "daemon";
pub const WALLET: &str = "chia_wallet";
pub const FULL_NODE: &str = "chia_full_node";
pub const SIMULATOR: &str = "chia_full_node_simulator";
pub const FARMER: &str = "chia_farmer";
pub const HARVESTER: &str = "chia_harvester";
pub const PLOTTER: &str = "chia_plotter";

/// A message from the daemon.
pub fn daemon_msg(command: &str, data: Value) -> Event {
    Event::incoming(DAEMON, command, data)
}

pub fn register_service() -> Event {
    daemon_msg("register_service", json!({}))
}

pub fn start_service(service: &str) -> Event {
    daemon_msg("start_service", json!({ "service": service }))
}

pub fn ping_from(origin: &str) -> Event {
    Event::incoming(origin, "ping", json!({}))
}

pub fn is_running(service: &str, running: bool) -> Event {
    daemon_msg(
        "is_running",
        json!({ "success": true, "service": service, "isRunning": running }),
    )
}

pub fn stop_service(service: &str, success: bool) -> Event {
    daemon_msg(
        "stop_service",
        json!({ "success": success, "serviceName": service }),
    )
}

pub fn cert_paths(cert: &str, key: &str) -> Event {
    daemon_msg(
        "get_cert_paths",
        json!({ "success": true, "cert": cert, "key": key }),
    )
}

pub fn exit_daemon() -> Event {
    Event::outgoing("exit", DAEMON)
}
