//! Environment variable substitution for config values.
//!
//! Supports `${VAR_NAME}` syntax in string values, resolved at load time.
//! Only uppercase `[A-Z_][A-Z0-9_]*` variable names are matched, so the
//! Deepgram key never has to live in the config file itself.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Pattern matching valid uppercase env var names.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("missing env var \"{var_name}\" referenced at config key: {config_key}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_key: String,
}

/// Substitute `${VAR}` references in a config string value.
/// Returns an error if any referenced var is unset or empty.
pub fn resolve_env(value: &str, config_key: &str) -> Result<String, MissingEnvVarError> {
    resolve_env_with(value, config_key, &std::env::vars().collect())
}

/// Substitute using a provided map (useful for testing).
pub fn resolve_env_with(
    value: &str,
    config_key: &str,
    env: &HashMap<String, String>,
) -> Result<String, MissingEnvVarError> {
    if !value.contains('$') {
        return Ok(value.to_string());
    }

    let mut error: Option<MissingEnvVarError> = None;
    let substituted = ENV_VAR_PATTERN.replace_all(value, |caps: &regex::Captures| {
        if error.is_some() {
            return String::new();
        }
        let var_name = &caps[1];
        match env.get(var_name) {
            Some(val) if !val.is_empty() => val.clone(),
            _ => {
                error = Some(MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_key: config_key.to_string(),
                });
                String::new()
            }
        }
    });

    match error {
        Some(err) => Err(err),
        None => Ok(substituted.into_owned()),
    }
}
