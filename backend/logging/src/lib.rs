//! Structured logging for the Dharma renderer.
//!
//! Console + rolling NDJSON file output via `tracing`, with credential
//! redaction for anything that might carry an API key.

pub mod logger;
pub mod redact;

pub use logger::init_logger;
pub use redact::redact_secrets;
