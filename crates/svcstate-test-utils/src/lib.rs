#![deny(unsafe_code)]

//! Shared test utilities for the svcstate workspace.
//!
//! Provides config builders, event fixtures, a spawned status store, and
//! tracing helpers so that individual crate tests stay concise and
//! consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! svcstate-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod events;
pub mod store;
pub mod tracing_setup;
