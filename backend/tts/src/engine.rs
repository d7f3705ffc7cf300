//! Speech synthesis provider (Deepgram Aura).
use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use dharma_config::SpeechConfig;
use dharma_core::DharmaError;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Deepgram Aura voices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuraVoice {
    Asteria,
    Orion,
    Luna,
    Stella,
    Atlas,
    /// The voice the product launched with.
    #[default]
    Hera,
    Orca,
    Perseus,
    Helios,
}

impl AuraVoice {
    /// Resolve a configured voice name (the `[speech] voice` value).
    /// Unknown names fall back to the default voice.
    pub fn from_config_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "asteria" => Self::Asteria,
            "orion" => Self::Orion,
            "luna" => Self::Luna,
            "stella" => Self::Stella,
            "atlas" => Self::Atlas,
            "hera" => Self::Hera,
            "orca" => Self::Orca,
            "perseus" => Self::Perseus,
            "helios" => Self::Helios,
            _ => Self::default(),
        }
    }

    pub fn as_model_name(&self) -> &'static str {
        match self {
            Self::Asteria => "aura-asteria-en",
            Self::Orion => "aura-orion-en",
            Self::Luna => "aura-luna-en",
            Self::Stella => "aura-stella-en",
            Self::Atlas => "aura-atlas-en",
            Self::Hera => "aura-hera-en",
            Self::Orca => "aura-orca-en",
            Self::Perseus => "aura-perseus-en",
            Self::Helios => "aura-helios-en",
        }
    }
}

/// A speech synthesis request.
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: AuraVoice,
    /// Output encoding: "mp3", "opus", "flac", "linear16", "mulaw", "alaw".
    pub encoding: Option<String>,
    /// Sample rate in Hz. Default 24000.
    pub sample_rate: Option<u32>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: AuraVoice::default(),
            encoding: None,
            sample_rate: None,
        }
    }

    /// Build a request from the `[speech]` config section.
    pub fn from_config(text: impl Into<String>, config: &SpeechConfig) -> Self {
        Self {
            text: text.into(),
            voice: AuraVoice::from_config_name(&config.voice),
            encoding: Some(config.encoding.clone()),
            sample_rate: Some(config.sample_rate),
        }
    }
}

/// Synthesized audio plus the metadata transports care about.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub audio_bytes: Bytes,
    /// Content-Type header from the provider.
    pub content_type: String,
    /// Number of characters synthesized.
    pub character_count: usize,
}

impl SpeechAudio {
    /// Base64 payload for channels that carry audio inline.
    pub fn to_base64(&self) -> String {
        use base64::{Engine as _, engine::general_purpose};
        general_purpose::STANDARD.encode(&self.audio_bytes)
    }
}

/// Returns raw audio for a piece of narratable text.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, req: SpeechRequest) -> Result<SpeechAudio>;
}

// ---------------------------------------------------------------------------
// Deepgram Aura
// ---------------------------------------------------------------------------

/// Deepgram Aura TTS client.
pub struct DeepgramTts {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DeepgramTts {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.deepgram.com/v1/speak".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SpeechProvider for DeepgramTts {
    async fn synthesize(&self, req: SpeechRequest) -> Result<SpeechAudio> {
        let encoding = req.encoding.as_deref().unwrap_or("mp3");
        let sample_rate = req.sample_rate.unwrap_or(24_000);

        let url = format!(
            "{}?model={}&encoding={}&sample_rate={}",
            self.base_url,
            req.voice.as_model_name(),
            encoding,
            sample_rate,
        );

        let character_count = req.text.chars().count();
        info!(
            "[TTS/Deepgram] Synthesizing {} chars with {}",
            character_count,
            req.voice.as_model_name()
        );

        #[derive(Serialize)]
        struct Body {
            text: String,
        }

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&Body { text: req.text })
            .send()
            .await
            .context("Deepgram TTS request failed")?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(DharmaError::Speech { status, message }.into());
        }

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_string();

        let audio_bytes = resp.bytes().await?;

        Ok(SpeechAudio {
            audio_bytes,
            content_type,
            character_count,
        })
    }
}
