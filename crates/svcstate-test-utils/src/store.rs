//! Status store test helpers.
//!
//! [`SpawnedStore`] runs a [`StatusStore`] on the current tokio runtime and
//! stops it when [`SpawnedStore::finish`] is called.

use svcstate_config::AppConfig;
use svcstate_core::{Status, StatusHandle, StatusReducer, StatusStore};
use tokio::task::JoinHandle;

/// A status store running on a background task.
pub struct SpawnedStore {
    pub handle: StatusHandle,
    task: JoinHandle<Status>,
}

impl SpawnedStore {
    pub fn spawn(config: &AppConfig) -> Self {
        let (store, handle) = StatusStore::new(StatusReducer::from_config(config));
        let task = tokio::spawn(store.run());
        Self { handle, task }
    }

    /// Shut the store down and return its final snapshot.
    pub async fn finish(self) -> Status {
        self.handle
            .shutdown()
            .await
            .expect("status store stopped early");
        self.task.await.expect("status store task panicked")
    }
}
