//! The status snapshot folded from the daemon event stream.

use std::fmt;

use serde::Serialize;

use crate::service::ServiceSlot;

/// One immutable view of which services are running and connected.
///
/// Field names serialize in camelCase (`daemonRunning`, `walletConnected`,
/// `certPath`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub daemon_running: bool,
    pub daemon_connected: bool,

    pub wallet_running: bool,
    pub wallet_connected: bool,

    pub full_node_running: bool,
    pub full_node_connected: bool,

    pub farmer_running: bool,
    pub farmer_connected: bool,

    pub harvester_running: bool,
    pub harvester_connected: bool,

    pub plotter_running: bool,

    /// Set once an exit request has been sent to the daemon.
    pub exiting: bool,

    pub cert_path: Option<String>,
    pub key_path: Option<String>,

    pub daemon_host: String,
}

impl Status {
    /// The fresh snapshot for a new connection lifecycle.
    pub fn initial(daemon_host: impl Into<String>) -> Self {
        Self {
            daemon_running: false,
            daemon_connected: false,
            wallet_running: false,
            wallet_connected: false,
            full_node_running: false,
            full_node_connected: false,
            farmer_running: false,
            farmer_connected: false,
            harvester_running: false,
            harvester_connected: false,
            plotter_running: false,
            exiting: false,
            cert_path: None,
            key_path: None,
            daemon_host: daemon_host.into(),
        }
    }

    pub fn is_running(&self, slot: ServiceSlot) -> bool {
        match slot {
            ServiceSlot::Wallet => self.wallet_running,
            ServiceSlot::FullNode => self.full_node_running,
            ServiceSlot::Farmer => self.farmer_running,
            ServiceSlot::Harvester => self.harvester_running,
            ServiceSlot::Plotter => self.plotter_running,
        }
    }

    /// Connection state; `None` for services that never connect.
    pub fn is_connected(&self, slot: ServiceSlot) -> Option<bool> {
        match slot {
            ServiceSlot::Wallet => Some(self.wallet_connected),
            ServiceSlot::FullNode => Some(self.full_node_connected),
            ServiceSlot::Farmer => Some(self.farmer_connected),
            ServiceSlot::Harvester => Some(self.harvester_connected),
            ServiceSlot::Plotter => None,
        }
    }

    pub(crate) fn running_mut(&mut self, slot: ServiceSlot) -> &mut bool {
        match slot {
            ServiceSlot::Wallet => &mut self.wallet_running,
            ServiceSlot::FullNode => &mut self.full_node_running,
            ServiceSlot::Farmer => &mut self.farmer_running,
            ServiceSlot::Harvester => &mut self.harvester_running,
            ServiceSlot::Plotter => &mut self.plotter_running,
        }
    }

    pub(crate) fn connected_mut(&mut self, slot: ServiceSlot) -> Option<&mut bool> {
        match slot {
            ServiceSlot::Wallet => Some(&mut self.wallet_connected),
            ServiceSlot::FullNode => Some(&mut self.full_node_connected),
            ServiceSlot::Farmer => Some(&mut self.farmer_connected),
            ServiceSlot::Harvester => Some(&mut self.harvester_connected),
            ServiceSlot::Plotter => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "daemon {}: {}",
            self.daemon_host,
            state_word(self.daemon_running, Some(self.daemon_connected))
        )?;
        for slot in ServiceSlot::ALL {
            write!(
                f,
                ", {}: {}",
                slot.title(),
                state_word(self.is_running(slot), self.is_connected(slot))
            )?;
        }
        if self.exiting {
            f.write_str(" (exiting)")?;
        }
        Ok(())
    }
}

fn state_word(running: bool, connected: Option<bool>) -> &'static str {
    match (running, connected) {
        (_, Some(true)) => "connected",
        (true, _) => "running",
        _ => "stopped",
    }
}
