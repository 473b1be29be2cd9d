//! Caller-tunable knobs for recompute invocations.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecomputeOptions {
    /// How long an invocation waits on conflicting range locks before giving
    /// up with a retryable error.
    pub lock_timeout: Duration,
}

impl Default for RecomputeOptions {
    fn default() -> Self {
        Self {
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        }
    }
}
