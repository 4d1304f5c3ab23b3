//! Async status store: drives the reducer from a channel and publishes
//! snapshots to subscribers.

use tokio::sync::{mpsc, watch};
use tracing::{info, trace};

use crate::event::Event;
use crate::reducer::StatusReducer;
use crate::status::Status;

/// Commands accepted by the store task.
#[derive(Debug)]
enum StoreCommand {
    Apply(Event),
    Shutdown,
}

/// Owns the current snapshot and applies events in the order they are sent.
///
/// Run it with [`StatusStore::run`] on a tokio task and talk to it through
/// the [`StatusHandle`] returned by [`StatusStore::new`].
pub struct StatusStore {
    reducer: StatusReducer,
    current: Status,
    command_rx: mpsc::Receiver<StoreCommand>,
    status_tx: watch::Sender<Status>,
}

/// Cloneable handle for feeding events to a running [`StatusStore`] and
/// observing its snapshots.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    command_tx: mpsc::Sender<StoreCommand>,
    status_rx: watch::Receiver<Status>,
}

impl StatusHandle {
    /// Queue an event for the store.
    pub async fn send(&self, event: Event) -> Result<(), StoreError> {
        self.command_tx
            .send(StoreCommand::Apply(event))
            .await
            .map_err(|_| StoreError::Closed)
    }

    /// Ask the store to stop after the events already queued.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.command_tx
            .send(StoreCommand::Shutdown)
            .await
            .map_err(|_| StoreError::Closed)
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status_rx.clone()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Status {
        self.status_rx.borrow().clone()
    }
}

impl StatusStore {
    /// Create a store starting from the reducer's initial snapshot.
    pub fn new(reducer: StatusReducer) -> (Self, StatusHandle) {
        let (command_tx, command_rx) = mpsc::channel(256);
        let current = reducer.initial().clone();
        let (status_tx, status_rx) = watch::channel(current.clone());

        let store = Self {
            reducer,
            current,
            command_rx,
            status_tx,
        };
        let handle = StatusHandle {
            command_tx,
            status_rx,
        };

        (store, handle)
    }

    /// Apply events until shutdown is requested or every handle is dropped.
    ///
    /// Returns the final snapshot.
    pub async fn run(mut self) -> Status {
        info!(host = %self.current.daemon_host, "status store started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                StoreCommand::Apply(event) => self.handle_event(&event),
                StoreCommand::Shutdown => {
                    info!("status store shutting down");
                    break;
                }
            }
        }

        info!("status store stopped");
        self.current
    }

    fn handle_event(&mut self, event: &Event) {
        let next = self.reducer.apply(&self.current, event);
        if next == self.current {
            return;
        }
        trace!(kind = event.kind(), status = %next, "publishing status");
        self.current = next;
        // Subscribers only wake for actual changes.
        self.status_tx.send_replace(self.current.clone());
    }
}

/// Errors from talking to the status store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("status store is no longer running")]
    Closed,
}
