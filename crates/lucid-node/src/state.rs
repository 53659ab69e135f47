//! Shared node state for cross-task communication.

use std::time::Instant;
use tokio::sync::mpsc;

use crate::commands::RegistryCommand;

/// Shared state for the running node, accessible from HTTP handlers.
pub struct NodeState {
    /// When the node started.
    pub start_time: Instant,
    /// Channel to send commands to the event loop.
    pub command_tx: mpsc::Sender<RegistryCommand>,
}

impl NodeState {
    pub fn new(command_tx: mpsc::Sender<RegistryCommand>) -> Self {
        Self {
            start_time: Instant::now(),
            command_tx,
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
