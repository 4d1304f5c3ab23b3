#![deny(unsafe_code)]

//! svcstate core: the service-status state machine.
//!
//! Folds the messages exchanged with the coordinating daemon and its
//! sub-services (full node, wallet, farmer, harvester, plotter) into a single
//! [`Status`] snapshot. The [`StatusReducer`] is a pure `(state, event) ->
//! state` function; [`StatusStore`] drives it from an async channel for
//! consumers that want published snapshots.

/// Event types and their JSON wire form.
pub mod event;
/// Protocol commands and payload accessors.
pub mod message;
/// The pure status reducer.
pub mod reducer;
/// Service identity and the wire-identifier directory.
pub mod service;
/// The status snapshot.
pub mod status;
/// Async snapshot store driven by the reducer.
pub mod store;

pub use event::{Event, EventDecodeError, decode_stream};
pub use message::Command;
pub use reducer::StatusReducer;
pub use service::{ServiceDirectory, ServiceName, ServiceSlot};
pub use status::Status;
pub use store::{StatusHandle, StatusStore, StoreError};
