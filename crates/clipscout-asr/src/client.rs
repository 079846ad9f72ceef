//! Whisper service HTTP client.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;
use tracing::{debug, warn};

use clipscout_models::Transcription;

use crate::error::{AsrError, AsrResult};
use crate::types::VerboseTranscription;

/// Configuration for the Whisper client.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Base URL of the transcription service. `None` disables transcription.
    pub base_url: Option<String>,
    /// Model name passed through to the service
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: "base".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl WhisperConfig {
    /// Create config from environment variables. An unset or empty
    /// `WHISPER_BASE_URL` leaves transcription disabled.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("WHISPER_BASE_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            model: std::env::var("WHISPER_MODEL").unwrap_or_else(|_| "base".to_string()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the Whisper transcription service.
pub struct WhisperClient {
    http: Client,
    config: WhisperConfig,
}

impl WhisperClient {
    /// Create a new Whisper client.
    pub fn new(config: WhisperConfig) -> AsrResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AsrError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AsrResult<Self> {
        Self::new(WhisperConfig::from_env())
    }

    /// Whether a service URL is configured.
    pub fn is_configured(&self) -> bool {
        self.config.base_url.is_some()
    }

    /// Transcribe a WAV file. This never fails the caller: an unconfigured
    /// service, a failed request, or a timeout all collapse into
    /// [`Transcription::Unavailable`] with a reason.
    pub async fn transcribe(&self, wav_path: &Path) -> Transcription {
        match self.request_transcription(wav_path).await {
            Ok(segments) => Transcription::Segments { segments },
            Err(e) => {
                warn!(error = %e, "Transcription unavailable");
                Transcription::unavailable(e.to_string())
            }
        }
    }

    async fn request_transcription(
        &self,
        wav_path: &Path,
    ) -> AsrResult<Vec<clipscout_models::TranscriptSegment>> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .ok_or(AsrError::NotConfigured)?;
        let url = format!(
            "{}/v1/audio/transcriptions",
            base_url.trim_end_matches('/')
        );

        let bytes = tokio::fs::read(wav_path).await?;
        let file_name = wav_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/wav")?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json");

        debug!(url = %url, "Sending transcription request");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AsrError::Timeout(self.config.timeout.as_secs())
                } else {
                    AsrError::Network(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AsrError::RequestFailed(format!(
                "transcription service returned {}: {}",
                status, body
            )));
        }

        let parsed: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| AsrError::InvalidResponse(e.to_string()))?;
        Ok(parsed.into_segments())
    }
}
