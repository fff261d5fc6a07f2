//! Speech-to-text over an OpenAI-compatible transcription API.
//!
//! The request is a blocking multipart upload of the recorded WAV with bearer
//! authentication; the response is `{"text": "..."}`. Every failure is mapped
//! onto one of the [`TranscriptionError`] kinds.

use crate::config::TranscriptionConfig;
use crate::{AudioHandle, TranscriptionError};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Anything that can turn a recording into text
pub trait Transcriber {
    fn transcribe(&self, audio: &AudioHandle) -> Result<String, TranscriptionError>;
}

/// Whisper-style API response
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Blocking HTTP client for a Whisper-compatible endpoint
pub struct HttpTranscriber {
    endpoint: String,
    model: String,
    language: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTranscriber {
    /// Build a client from config, reading the API key from the configured
    /// environment variable
    pub fn from_config(config: &TranscriptionConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::debug!("No API key found in ${}", config.api_key_env);
        }

        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            language: Some(config.language.clone()).filter(|l| !l.is_empty()),
            api_key,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl Transcriber for HttpTranscriber {
    fn transcribe(&self, audio: &AudioHandle) -> Result<String, TranscriptionError> {
        if !audio.path.exists() {
            tracing::warn!("Audio file not found: {:?}", audio.path);
            return Err(TranscriptionError::FileMissing(audio.path.clone()));
        }

        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::warn!("Transcription requested without an API key");
            TranscriptionError::ServiceUnavailable("no API key configured".into())
        })?;

        let audio_data = std::fs::read(&audio.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TranscriptionError::FileMissing(audio.path.clone())
            } else {
                TranscriptionError::Unknown(format!("Failed to read audio file: {}", e))
            }
        })?;

        let file_name = audio
            .path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let file_part = Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscriptionError::Unknown(format!("Failed to build upload: {}", e)))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("response_format", "json");
        if let Some(ref language) = self.language {
            form = form.text("language", language.clone());
        }

        tracing::debug!(
            "Transcription request: POST {} (model={}, {} samples)",
            self.endpoint,
            self.model,
            audio.samples
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| TranscriptionError::Unknown(format!("Failed to build client: {}", e)))?;

        let response = client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Transcription service returned {}: {}", status, body);
            return Err(map_status(status, &body));
        }

        let body = response
            .text()
            .map_err(|e| TranscriptionError::ServiceUnavailable(e.to_string()))?;
        parse_response(&body)
    }
}

fn map_request_error(e: reqwest::Error) -> TranscriptionError {
    if e.is_connect() {
        TranscriptionError::ServiceUnavailable(
            "failed to connect to the transcription service".into(),
        )
    } else if e.is_timeout() {
        TranscriptionError::ServiceUnavailable("the request timed out".into())
    } else {
        TranscriptionError::Unknown(format!("network error: {}", e))
    }
}

/// Map a non-success HTTP status onto an error kind
fn map_status(status: StatusCode, body: &str) -> TranscriptionError {
    match status.as_u16() {
        429 => TranscriptionError::ServiceUnavailable("rate limit reached".into()),
        401 | 403 => {
            TranscriptionError::ServiceUnavailable(format!("request rejected ({})", status))
        }
        500..=599 => {
            TranscriptionError::ServiceUnavailable(format!("service error ({})", status))
        }
        _ => TranscriptionError::Unknown(format!("API error (status {}): {}", status, body)),
    }
}

/// Parse the response body; blank text means nothing was recognized
fn parse_response(body: &str) -> Result<String, TranscriptionError> {
    let response: TranscriptionResponse = serde_json::from_str(body)
        .map_err(|e| TranscriptionError::Unknown(format!("Failed to parse response: {}", e)))?;

    let text = response.text.trim();
    if text.is_empty() {
        return Err(TranscriptionError::Unintelligible);
    }

    tracing::info!("Transcribed {} characters", text.len());
    Ok(text.to_string())
}
