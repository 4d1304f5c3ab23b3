//! The status reducer: folds [`Event`]s into [`Status`] snapshots.
//!
//! [`StatusReducer::apply`] is a total function. Events it does not
//! recognize, and recognized events whose guard does not hold, yield a
//! snapshot equal to the input. It never fails and has no side effects
//! beyond `tracing` diagnostics.
//!
//! ## Transitions
//!
//! | Event | Guard | Effect |
//! |-------|-------|--------|
//! | `change_host` | | `daemon_host` replaced |
//! | `register_service` | origin is the daemon | daemon running and connected |
//! | `start_service` | origin is the daemon | `data.service` running |
//! | `ping` | any origin | origin connected |
//! | `is_running` | daemon, `data.success` | `data.service` running = `data.isRunning` |
//! | `stop_service` | daemon, `data.success`, plotter | plotter stopped |
//! | `get_cert_paths` | daemon, `data.success` | cert/key paths from `data.cert`/`data.key` |
//! | outgoing `exit` | destination is the daemon | `exiting` set |
//! | `transport_disconnected` | | back to the initial snapshot |
//!
//! `start_service` and `ping` only reach services with a long-lived
//! connection; the plotter is only reachable through `is_running` and
//! `stop_service`.

use serde_json::Value;
use tracing::{debug, trace};

use svcstate_config::AppConfig;

use crate::event::Event;
use crate::message::{Command, flag, str_field};
use crate::service::{ServiceDirectory, ServiceName, ServiceSlot};
use crate::status::Status;

/// Applies events to status snapshots.
///
/// Holds the initial snapshot (seeded with the configured daemon host) and
/// the service directory used to resolve wire identifiers.
#[derive(Debug, Clone)]
pub struct StatusReducer {
    initial: Status,
    services: ServiceDirectory,
}

impl StatusReducer {
    pub fn new(default_host: impl Into<String>, services: ServiceDirectory) -> Self {
        Self {
            initial: Status::initial(default_host),
            services,
        }
    }

    /// Build a reducer from the daemon host and service table in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.daemon.host.clone(),
            ServiceDirectory::new(&config.services),
        )
    }

    /// The snapshot every connection lifecycle starts from.
    pub fn initial(&self) -> &Status {
        &self.initial
    }

    /// Apply one event, returning the next snapshot.
    pub fn apply(&self, state: &Status, event: &Event) -> Status {
        match event {
            Event::ChangeHost { host } => {
                trace!(%host, "daemon host changed");
                Status {
                    daemon_host: host.clone(),
                    ..state.clone()
                }
            }
            Event::IncomingMessage {
                origin,
                command,
                data,
            } => self.apply_incoming(state, origin, command, data),
            Event::OutgoingMessage {
                command,
                destination,
            } => {
                let is_exit = Command::parse(command) == Command::Exit;
                if is_exit && self.services.resolve(destination).is_daemon() {
                    trace!("exit requested");
                    Status {
                        exiting: true,
                        ..state.clone()
                    }
                } else {
                    state.clone()
                }
            }
            Event::TransportDisconnected => {
                trace!("transport disconnected, resetting status");
                self.initial.clone()
            }
        }
    }

    /// Fold a sequence of events starting from the initial snapshot.
    pub fn replay<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> Status {
        events
            .into_iter()
            .fold(self.initial.clone(), |state, event| self.apply(&state, event))
    }

    fn apply_incoming(&self, state: &Status, origin: &str, command: &str, data: &Value) -> Status {
        let origin = self.services.resolve(origin);
        let command = Command::parse(command);

        if !origin.is_daemon() && command != Command::Ping {
            debug!(%origin, %command, "ignoring message from untracked origin");
            return state.clone();
        }

        let mut next = state.clone();
        let applied = match &command {
            Command::RegisterService => {
                next.daemon_running = true;
                next.daemon_connected = true;
                true
            }
            Command::StartService => match connectable(self.payload_slot(data, "service")) {
                Some(slot) => {
                    *next.running_mut(slot) = true;
                    true
                }
                None => false,
            },
            Command::Ping => match connectable(origin.slot()) {
                Some(slot) => match next.connected_mut(slot) {
                    Some(connected) => {
                        *connected = true;
                        true
                    }
                    None => false,
                },
                None => false,
            },
            Command::IsRunning if flag(data, "success") => {
                match self.payload_slot(data, "service") {
                    Some(slot) => {
                        *next.running_mut(slot) = flag(data, "isRunning");
                        true
                    }
                    None => false,
                }
            }
            Command::StopService if flag(data, "success") => {
                if self.payload_slot(data, "serviceName") == Some(ServiceSlot::Plotter) {
                    next.plotter_running = false;
                    true
                } else {
                    false
                }
            }
            Command::GetCertPaths if flag(data, "success") => {
                next.cert_path = str_field(data, "cert").map(str::to_owned);
                next.key_path = str_field(data, "key").map(str::to_owned);
                true
            }
            _ => false,
        };

        if !applied {
            debug!(%origin, %command, "message did not change status");
            return state.clone();
        }

        trace!(%origin, %command, "status updated");
        next
    }

    /// Resolve a service identifier carried in the payload.
    fn payload_slot(&self, data: &Value, key: &str) -> Option<ServiceSlot> {
        str_field(data, key)
            .map(|wire| self.services.resolve(wire))
            .as_ref()
            .and_then(ServiceName::slot)
    }
}

fn connectable(slot: Option<ServiceSlot>) -> Option<ServiceSlot> {
    slot.filter(|s| s.is_connectable())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const HOST: &str = "wss://127.0.0.1:55400";

    fn reducer() -> StatusReducer {
        StatusReducer::new(HOST, ServiceDirectory::default())
    }

    fn from_daemon(command: &str, data: Value) -> Event {
        Event::incoming("daemon", command, data)
    }

    fn step(events: &[Event]) -> Status {
        reducer().replay(events)
    }

    #[test]
    fn test_change_host_only_touches_host() {
        let r = reducer();
        let base = step(&[from_daemon("register_service", json!({}))]);
        let next = r.apply(&base, &Event::change_host("wss://10.0.0.9:55400"));
        assert_eq!(
            next,
            Status {
                daemon_host: "wss://10.0.0.9:55400".to_string(),
                ..base
            }
        );
    }

    #[test]
    fn test_register_service_sets_daemon_flags() {
        let status = step(&[from_daemon("register_service", json!({}))]);
        assert!(status.daemon_running);
        assert!(status.daemon_connected);
    }

    #[test]
    fn test_register_service_from_other_origin_ignored() {
        let r = reducer();
        let event = Event::incoming("chia_wallet", "register_service", json!({}));
        assert_eq!(r.apply(r.initial(), &event), *r.initial());
    }

    #[test]
    fn test_start_service_sets_running() {
        for (wire, slot) in [
            ("chia_wallet", ServiceSlot::Wallet),
            ("chia_full_node", ServiceSlot::FullNode),
            ("chia_full_node_simulator", ServiceSlot::FullNode),
            ("chia_farmer", ServiceSlot::Farmer),
            ("chia_harvester", ServiceSlot::Harvester),
        ] {
            let status = step(&[from_daemon("start_service", json!({"service": wire}))]);
            assert!(status.is_running(slot), "{wire} should be running");
            assert_eq!(status.is_connected(slot), Some(false));
        }
    }

    #[test]
    fn test_start_service_ignores_plotter_and_unknown() {
        let r = reducer();
        for data in [
            json!({"service": "chia_plotter"}),
            json!({"service": "chia_timelord"}),
            json!({"service": "daemon"}),
            json!({"service": 7}),
            json!({}),
        ] {
            let event = from_daemon("start_service", data);
            assert_eq!(r.apply(r.initial(), &event), *r.initial());
        }
    }

    #[test]
    fn test_ping_sets_connected_from_any_tracked_origin() {
        for (wire, slot) in [
            ("chia_wallet", ServiceSlot::Wallet),
            ("chia_full_node", ServiceSlot::FullNode),
            ("chia_full_node_simulator", ServiceSlot::FullNode),
            ("chia_farmer", ServiceSlot::Farmer),
            ("chia_harvester", ServiceSlot::Harvester),
        ] {
            let status = step(&[Event::incoming(wire, "ping", json!({}))]);
            assert_eq!(status.is_connected(slot), Some(true));
            assert!(!status.is_running(slot));
        }
    }

    #[test]
    fn test_ping_from_daemon_plotter_or_unknown_is_noop() {
        let r = reducer();
        for origin in ["daemon", "chia_plotter", "chia_timelord"] {
            let event = Event::incoming(origin, "ping", json!({}));
            assert_eq!(r.apply(r.initial(), &event), *r.initial());
        }
    }

    #[test]
    fn test_is_running_sets_exact_value() {
        let r = reducer();
        let running = r.apply(
            r.initial(),
            &from_daemon(
                "is_running",
                json!({"success": true, "service": "chia_farmer", "isRunning": true}),
            ),
        );
        assert!(running.farmer_running);

        let stopped = r.apply(
            &running,
            &from_daemon(
                "is_running",
                json!({"success": true, "service": "chia_farmer", "isRunning": false}),
            ),
        );
        assert!(!stopped.farmer_running);
    }

    #[test]
    fn test_is_running_reaches_plotter() {
        let status = step(&[from_daemon(
            "is_running",
            json!({"success": true, "service": "chia_plotter", "isRunning": true}),
        )]);
        assert!(status.plotter_running);
    }

    #[test]
    fn test_is_running_missing_flag_reads_false() {
        let r = reducer();
        let base = step(&[from_daemon("start_service", json!({"service": "chia_wallet"}))]);
        let next = r.apply(
            &base,
            &from_daemon("is_running", json!({"success": true, "service": "chia_wallet"})),
        );
        assert!(!next.wallet_running);
    }

    #[test]
    fn test_is_running_requires_success() {
        let r = reducer();
        for success in [json!(false), json!(0), json!(""), json!(null)] {
            let event = from_daemon(
                "is_running",
                json!({"success": success, "service": "chia_wallet", "isRunning": true}),
            );
            assert_eq!(r.apply(r.initial(), &event), *r.initial());
        }
    }

    #[test]
    fn test_stop_service_only_handles_plotter() {
        let r = reducer();
        let base = step(&[
            from_daemon(
                "is_running",
                json!({"success": true, "service": "chia_plotter", "isRunning": true}),
            ),
            from_daemon("start_service", json!({"service": "chia_wallet"})),
        ]);

        let wallet_stop = from_daemon(
            "stop_service",
            json!({"success": true, "serviceName": "chia_wallet"}),
        );
        assert_eq!(r.apply(&base, &wallet_stop), base);

        let failed_stop = from_daemon(
            "stop_service",
            json!({"success": false, "serviceName": "chia_plotter"}),
        );
        assert_eq!(r.apply(&base, &failed_stop), base);

        let plotter_stop = from_daemon(
            "stop_service",
            json!({"success": true, "serviceName": "chia_plotter"}),
        );
        let next = r.apply(&base, &plotter_stop);
        assert!(!next.plotter_running);
        assert!(next.wallet_running);
    }

    #[test]
    fn test_get_cert_paths() {
        let status = step(&[from_daemon(
            "get_cert_paths",
            json!({"success": true, "cert": "/ssl/daemon.crt", "key": "/ssl/daemon.key"}),
        )]);
        assert_eq!(status.cert_path.as_deref(), Some("/ssl/daemon.crt"));
        assert_eq!(status.key_path.as_deref(), Some("/ssl/daemon.key"));
    }

    #[test]
    fn test_get_cert_paths_requires_success() {
        let r = reducer();
        let event = from_daemon("get_cert_paths", json!({"cert": "/c", "key": "/k"}));
        assert_eq!(r.apply(r.initial(), &event), *r.initial());
    }

    #[test]
    fn test_unknown_command_is_noop() {
        let r = reducer();
        let event = from_daemon("get_plots", json!({"success": true}));
        assert_eq!(r.apply(r.initial(), &event), *r.initial());
    }

    #[test]
    fn test_exit_to_daemon_sets_exiting() {
        let r = reducer();
        let next = r.apply(r.initial(), &Event::outgoing("exit", "daemon"));
        assert!(next.exiting);
    }

    #[test]
    fn test_other_outgoing_messages_are_noops() {
        let r = reducer();
        for event in [
            Event::outgoing("exit", "chia_wallet"),
            Event::outgoing("start_service", "daemon"),
            Event::outgoing("ping", "chia_farmer"),
        ] {
            assert_eq!(r.apply(r.initial(), &event), *r.initial());
        }
    }

    #[test]
    fn test_disconnect_restores_configured_host() {
        let r = reducer();
        let busy = step(&[
            Event::change_host("wss://elsewhere:55400"),
            from_daemon("register_service", json!({})),
            Event::incoming("chia_wallet", "ping", json!({})),
            Event::outgoing("exit", "daemon"),
        ]);
        assert_eq!(busy.daemon_host, "wss://elsewhere:55400");

        let reset = r.apply(&busy, &Event::TransportDisconnected);
        assert_eq!(reset, Status::initial(HOST));
    }

    #[test]
    fn test_custom_service_directory() {
        let names = svcstate_config::ServiceNamesConfig {
            wallet: "wallet".to_string(),
            ..Default::default()
        };
        let r = StatusReducer::new(HOST, ServiceDirectory::new(&names));
        let status = r.apply(r.initial(), &Event::incoming("wallet", "ping", json!({})));
        assert!(status.wallet_connected);
    }

    #[test]
    fn test_from_config_seeds_host() {
        let mut config = AppConfig::default();
        config.daemon.host = "wss://node.lan:55400".to_string();
        let r = StatusReducer::from_config(&config);
        assert_eq!(r.initial().daemon_host, "wss://node.lan:55400");
    }
}
