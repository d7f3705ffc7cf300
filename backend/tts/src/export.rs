//! Export Adapter — clipboard, share, and speech.
//!
//! Every export path hands out the same plain-text projection of the parsed
//! message, so what leaves the app always matches what the bubble displays,
//! modulo presentation-only markup. Speech runs fire-and-forget: a failed
//! synthesis is logged and never touches the render or any other export.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use dharma_markdown::{ParsedMessage, Renderer};

use crate::engine::{AuraVoice, SpeechAudio, SpeechProvider, SpeechRequest};

/// Text for a clipboard write.
pub fn clipboard_text(msg: &ParsedMessage) -> String {
    Renderer::to_plain_text(msg)
}

/// Text for the native share sheet.
pub fn share_text(msg: &ParsedMessage) -> String {
    Renderer::to_plain_text(msg)
}

/// Text for the speech-synthesis request body.
pub fn speech_text(msg: &ParsedMessage) -> String {
    Renderer::to_plain_text(msg)
}

/// Synthesize the narratable projection of a message.
pub async fn speak(
    provider: &dyn SpeechProvider,
    msg: &ParsedMessage,
    voice: AuraVoice,
) -> Result<SpeechAudio> {
    let mut req = SpeechRequest::new(speech_text(msg));
    req.voice = voice;
    provider.synthesize(req).await
}

/// Fire-and-forget speech export.
///
/// Each call is an independent task with no ordering guarantee relative to
/// other in-flight exports. `on_audio` receives the synthesized payload;
/// failures are logged and dropped.
pub fn spawn_speak<F>(
    provider: Arc<dyn SpeechProvider>,
    msg: &ParsedMessage,
    voice: AuraVoice,
    on_audio: F,
) -> tokio::task::JoinHandle<()>
where
    F: FnOnce(SpeechAudio) + Send + 'static,
{
    let text = speech_text(msg);
    tokio::spawn(async move {
        let mut req = SpeechRequest::new(text);
        req.voice = voice;
        match provider.synthesize(req).await {
            Ok(audio) => {
                debug!(
                    "[Export] Speech ready: {} bytes, {}",
                    audio.audio_bytes.len(),
                    audio.content_type
                );
                on_audio(audio);
            }
            Err(err) => warn!("[Export] Speech synthesis failed: {err:#}"),
        }
    })
}
