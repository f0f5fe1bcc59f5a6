// Engine settings, potentially loaded from a config file or environment variables
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Frame interval of the playback drive task, in milliseconds.
    pub playback_tick_ms: u64,
    /// Maximum accepted post length for the moderation filter.
    pub max_post_length: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50061,
            playback_tick_ms: 16,
            max_post_length: 5000,
        }
    }
}

// TODO: Load these settings from the application's config file instead of
// relying on compiled-in defaults.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let settings: EngineSettings = serde_json::from_str(r#"{ "port": 9090 }"#).unwrap();
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.playback_tick_ms, 16);
        assert_eq!(settings.max_post_length, 5000);
    }
}
