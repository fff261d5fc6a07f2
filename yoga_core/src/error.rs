//! Error types for the yoga_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for yoga_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// WAV encoding error
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Audio device or driver failure
    #[error("Recording error: {0}")]
    Recording(String),

    /// Speech-to-text failure
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}

impl Error {
    /// Message suitable for showing to the user in place of a stack of causes
    pub fn user_message(&self) -> String {
        match self {
            Error::Recording(_) | Error::Wav(_) => {
                "Failed to record audio. Please check your microphone.".to_string()
            }
            Error::Transcription(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

/// Ways a transcription request can fail
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    /// The recording is not on disk
    #[error("Audio file not found")]
    FileMissing(PathBuf),

    /// Audio was present but no speech was recognized
    #[error("Could not understand the audio. Please speak more clearly.")]
    Unintelligible,

    /// Network or service failure
    #[error("Could not request results from the speech recognition service; {0}")]
    ServiceUnavailable(String),

    /// Anything else
    #[error("Error processing audio: {0}")]
    Unknown(String),
}
