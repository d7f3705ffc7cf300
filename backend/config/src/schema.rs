//! Config schema and defaults.

use serde::{Deserialize, Serialize};

/// Default Aura voice.
pub const DEFAULT_VOICE: &str = "hera";

/// Default audio encoding for speech synthesis.
pub const DEFAULT_ENCODING: &str = "mp3";

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// Default log level when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Top-level configuration, loaded from `dharma.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DharmaConfig {
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Deepgram API key; usually `${DEEPGRAM_API_KEY}`.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice: DEFAULT_VOICE.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_log_dir() -> String {
    DEFAULT_LOG_DIR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DharmaConfig::default();
        assert_eq!(config.speech.voice, "hera");
        assert_eq!(config.speech.sample_rate, 24_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: DharmaConfig = toml::from_str("[speech]\nvoice = \"luna\"\n").unwrap();
        assert_eq!(config.speech.voice, "luna");
        assert_eq!(config.speech.encoding, "mp3");
        assert_eq!(config.logging.dir, "logs");
    }
}
