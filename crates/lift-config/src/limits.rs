//! Resilience limits for external calls.

use serde::{Deserialize, Serialize};

/// Default maximum attempts (including the initial one).
const fn default_max_attempts() -> u32 {
    4
}

/// Default initial backoff delay in milliseconds.
const fn default_base_delay_ms() -> u64 {
    1_000
}

/// Default backoff delay cap in milliseconds.
const fn default_max_delay_ms() -> u64 {
    30_000
}

/// Default calls allowed per rolling 60-second window.
const fn default_calls_per_minute() -> u32 {
    250
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum attempts per external call, including the initial one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial backoff delay in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Backoff delay cap in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Calls allowed per rolling 60-second window. The target platform
    /// enforces one shared budget across all operations.
    #[serde(default = "default_calls_per_minute")]
    pub calls_per_minute: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            calls_per_minute: default_calls_per_minute(),
        }
    }
}
