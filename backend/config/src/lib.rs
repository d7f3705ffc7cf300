//! Configuration for the Dharma renderer's collaborators.
//!
//! Loads `dharma.toml`, falling back to defaults when the file is absent,
//! and resolves `${VAR}` environment references in string values so API
//! keys stay out of the file.

pub mod env;
pub mod schema;

pub use env::{MissingEnvVarError, resolve_env};
pub use schema::{DharmaConfig, LoggingConfig, SpeechConfig};

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from `path`. A missing file yields pure defaults;
/// a malformed file is an error.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DharmaConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(DharmaConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let mut config: DharmaConfig =
        toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    config.speech.api_key = env::resolve_env(&config.speech.api_key, "speech.api_key")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load("/nonexistent/dharma.toml").unwrap();
        assert_eq!(config.speech.voice, "hera");
    }

    #[test]
    fn test_load_resolves_api_key() {
        // Process env is shared across tests; use a uniquely named var.
        std::env::set_var("DHARMA_TEST_DG_KEY", "dg_123");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dharma.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[speech]\napi_key = \"${{DHARMA_TEST_DG_KEY}}\"").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.speech.api_key, "dg_123");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dharma.toml");
        std::fs::write(&path, "not toml [[[").unwrap();
        assert!(load(&path).is_err());
    }
}
