use serde::{Deserialize, Serialize};

/// Tuning for a registry instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Rewrite visited parents to point at the root during `find`.
    #[serde(default = "default_path_compression")]
    pub path_compression: bool,
    /// Capacity of the event broadcast channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_path_compression() -> bool {
    true
}
fn default_event_capacity() -> usize {
    1024
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path_compression: default_path_compression(),
            event_capacity: default_event_capacity(),
        }
    }
}
