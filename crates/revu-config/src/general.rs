//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_log_level() -> String {
    "warn".to_string()
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Fallback tracing filter when `REVU_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_limit, 20);
    }
}
