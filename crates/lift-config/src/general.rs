//! General migration configuration.

use serde::{Deserialize, Serialize};

/// Default hour-per-day scaling factor for duration rendering.
const fn default_hours_per_day() -> f64 {
    8.0
}

/// Default maximum supported row nesting depth on the target platform.
const fn default_max_indent() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Hours per working day when rendering durations as day counts.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,

    /// Maximum row nesting depth; deeper tasks are clamped with a warning.
    #[serde(default = "default_max_indent")]
    pub max_indent: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
            max_indent: default_max_indent(),
        }
    }
}
