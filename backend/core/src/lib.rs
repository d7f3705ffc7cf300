pub mod error;
pub mod message;

pub use error::DharmaError;
pub use message::{ChatMessage, Role, TOOL_USE_MARKER};
