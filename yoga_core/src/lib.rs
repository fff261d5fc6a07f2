#![forbid(unsafe_code)]

//! Core domain model and business logic for the Yoga Pose Suggester.
//!
//! This crate provides:
//! - Domain types (pain areas, poses, classification results)
//! - The pose catalog
//! - Pain-area classification of transcribed speech
//! - The reorderable routine and the session that owns it
//! - Microphone capture and speech-to-text collaborators

pub mod types;
pub mod error;
pub mod catalog;
pub mod classifier;
pub mod routine;
pub mod audio;
pub mod transcription;
pub mod session;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result, TranscriptionError};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, PoseCatalog};
pub use classifier::classify;
pub use routine::RoutineState;
pub use audio::{AudioCapture, MicrophoneRecorder};
pub use transcription::{HttpTranscriber, Transcriber};
pub use session::Session;
pub use config::Config;
