pub mod engine;
pub mod export;

pub use engine::{AuraVoice, DeepgramTts, SpeechAudio, SpeechProvider, SpeechRequest};
pub use export::{clipboard_text, share_text, spawn_speak, speak, speech_text};
