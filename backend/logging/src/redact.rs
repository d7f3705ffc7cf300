//! Log Redaction
//!
//! Scrubs Deepgram keys and bearer tokens from strings prior to logging.
//! Export paths log request context; the credential must never ride along.

use regex::Regex;
use std::sync::LazyLock;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Bearer|Token)\s+[A-Za-z0-9\-\._~+/]+=*").unwrap());
static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z_]*API_KEY\s*=\s*)\S+").unwrap());

/// Redacts credential patterns in a string.
pub fn redact_secrets(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    API_KEY_RE.replace_all(&redacted, "$1[REDACTED]").to_string()
}
