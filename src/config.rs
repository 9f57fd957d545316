use serde::{Deserialize, Serialize};

const DEFAULT_CAPACITY: usize = 16;

/// Creation parameters for a [`CircularQueue`](crate::CircularQueue).
///
/// Missing fields fall back to [`QueueConfig::default`], so an empty document
/// such as `{}` is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Number of slots to allocate up front. Zero is allowed.
    pub capacity: usize,
}

impl QueueConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
