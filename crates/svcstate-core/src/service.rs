//! Service identity: wire identifiers, the closed [`ServiceName`] set, and
//! the [`ServiceSlot`] selector that picks a field of the status snapshot.

use std::collections::HashMap;
use std::fmt;

use svcstate_config::ServiceNamesConfig;

/// A participant in the daemon protocol.
///
/// Identifiers that are not part of the configured set resolve to
/// [`ServiceName::Other`] instead of failing, so protocol extensions pass
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServiceName {
    Wallet,
    FullNode,
    /// Simulated full node. Shares the full node's status fields.
    Simulator,
    Daemon,
    Farmer,
    Harvester,
    Plotter,
    Other(String),
}

impl ServiceName {
    /// The status fields this service reports into, if it is tracked.
    ///
    /// This is the only place the full node / simulator alias is spelled out.
    pub fn slot(&self) -> Option<ServiceSlot> {
        match self {
            ServiceName::Wallet => Some(ServiceSlot::Wallet),
            ServiceName::FullNode | ServiceName::Simulator => Some(ServiceSlot::FullNode),
            ServiceName::Farmer => Some(ServiceSlot::Farmer),
            ServiceName::Harvester => Some(ServiceSlot::Harvester),
            ServiceName::Plotter => Some(ServiceSlot::Plotter),
            ServiceName::Daemon | ServiceName::Other(_) => None,
        }
    }

    pub fn is_daemon(&self) -> bool {
        matches!(self, ServiceName::Daemon)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceName::Wallet => f.write_str("wallet"),
            ServiceName::FullNode => f.write_str("full_node"),
            ServiceName::Simulator => f.write_str("simulator"),
            ServiceName::Daemon => f.write_str("daemon"),
            ServiceName::Farmer => f.write_str("farmer"),
            ServiceName::Harvester => f.write_str("harvester"),
            ServiceName::Plotter => f.write_str("plotter"),
            ServiceName::Other(raw) => write!(f, "other({raw})"),
        }
    }
}

/// Selector for the per-service fields of a status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceSlot {
    Wallet,
    FullNode,
    Farmer,
    Harvester,
    Plotter,
}

impl ServiceSlot {
    pub const ALL: [ServiceSlot; 5] = [
        ServiceSlot::Wallet,
        ServiceSlot::FullNode,
        ServiceSlot::Farmer,
        ServiceSlot::Harvester,
        ServiceSlot::Plotter,
    ];

    /// Whether the service holds a long-lived connection to the daemon.
    ///
    /// Plotting is a one-shot job: it is never started through
    /// `start_service` nor announced through `ping`.
    pub fn is_connectable(self) -> bool {
        !matches!(self, ServiceSlot::Plotter)
    }

    pub fn title(self) -> &'static str {
        match self {
            ServiceSlot::Wallet => "wallet",
            ServiceSlot::FullNode => "full node",
            ServiceSlot::Farmer => "farmer",
            ServiceSlot::Harvester => "harvester",
            ServiceSlot::Plotter => "plotter",
        }
    }
}

/// Lookup table from wire identifiers to [`ServiceName`]s.
#[derive(Debug, Clone)]
pub struct ServiceDirectory {
    by_wire: HashMap<String, ServiceName>,
}

impl ServiceDirectory {
    /// Build a directory from the configured identifier table.
    pub fn new(names: &ServiceNamesConfig) -> Self {
        let by_wire = [
            (&names.wallet, ServiceName::Wallet),
            (&names.full_node, ServiceName::FullNode),
            (&names.simulator, ServiceName::Simulator),
            (&names.daemon, ServiceName::Daemon),
            (&names.farmer, ServiceName::Farmer),
            (&names.harvester, ServiceName::Harvester),
            (&names.plotter, ServiceName::Plotter),
        ]
        .into_iter()
        .map(|(wire, name)| (wire.clone(), name))
        .collect();

        Self { by_wire }
    }

    /// Resolve a wire identifier. Unknown identifiers become [`ServiceName::Other`].
    pub fn resolve(&self, wire: &str) -> ServiceName {
        self.by_wire
            .get(wire)
            .cloned()
            .unwrap_or_else(|| ServiceName::Other(wire.to_string()))
    }
}

impl Default for ServiceDirectory {
    fn default() -> Self {
        Self::new(&ServiceNamesConfig::default())
    }
}
