//! Configuration system.
//!
//! Loads add-on configuration from JSON strings/files (file IO left to the
//! host integration).

use serde::{Deserialize, Serialize};

/// Root configuration shared by the replication and sprite-font subsystems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModConfig {
    /// Display name for this peer, used in log output.
    #[serde(default = "default_peer_name")]
    pub peer_name: String,
    /// Default scale applied to rendered textured strings.
    #[serde(default = "default_text_scale")]
    pub text_scale: f32,
    /// Whether glyph layout accounts for the previous character's trailing
    /// padding.
    #[serde(default = "default_use_right_padding")]
    pub use_right_padding: bool,
}

fn default_peer_name() -> String {
    "Player".to_string()
}

fn default_text_scale() -> f32 {
    1.0
}

fn default_use_right_padding() -> bool {
    true
}

impl Default for ModConfig {
    fn default() -> Self {
        Self {
            peer_name: default_peer_name(),
            text_scale: default_text_scale(),
            use_right_padding: default_use_right_padding(),
        }
    }
}

impl ModConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = ModConfig::from_json_str(r#"{ "peer_name": "Hana" }"#).unwrap();
        assert_eq!(cfg.peer_name, "Hana");
        assert_eq!(cfg.text_scale, 1.0);
        assert!(cfg.use_right_padding);
    }
}
