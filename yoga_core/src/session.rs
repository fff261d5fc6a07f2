//! One user's interactive session.
//!
//! The session ties the collaborators together: record, transcribe, classify,
//! then hold the resulting routine for reordering. A failed recording or
//! transcription leaves the previous transcript and routine exactly as they
//! were.

use crate::audio::AudioCapture;
use crate::classifier::classify;
use crate::routine::RoutineState;
use crate::transcription::Transcriber;
use crate::{PoseCatalog, Result};
use std::time::Duration;

pub struct Session<'c> {
    catalog: &'c PoseCatalog,
    capture: Box<dyn AudioCapture + 'c>,
    transcriber: Box<dyn Transcriber + 'c>,
    duration: Duration,
    transcript: Option<String>,
    routine: Option<RoutineState<'c>>,
}

impl<'c> Session<'c> {
    pub fn new(
        catalog: &'c PoseCatalog,
        capture: Box<dyn AudioCapture + 'c>,
        transcriber: Box<dyn Transcriber + 'c>,
        duration: Duration,
    ) -> Self {
        Self {
            catalog,
            capture,
            transcriber,
            duration,
            transcript: None,
            routine: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Last successfully transcribed text
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn routine(&self) -> Option<&RoutineState<'c>> {
        self.routine.as_ref()
    }

    /// Record, transcribe and classify, replacing the current routine
    pub fn record(&mut self) -> Result<&RoutineState<'c>> {
        let audio = self.capture.record(self.duration).map_err(|e| {
            tracing::warn!("Recording failed: {}", e);
            e
        })?;

        let text = self.transcriber.transcribe(&audio).map_err(|e| {
            tracing::warn!("Transcription failed: {:?}", e);
            e
        })?;

        Ok(self.apply_transcript(text))
    }

    /// Classify already-transcribed text and replace the current routine
    pub fn apply_transcript(&mut self, text: impl Into<String>) -> &RoutineState<'c> {
        let text = text.into();
        let classification = classify(self.catalog, &text);
        self.transcript = Some(text);

        let routine = match self.routine.take() {
            Some(mut routine) => {
                routine.initialize(classification);
                routine
            }
            None => RoutineState::new(self.catalog, classification),
        };
        self.routine.insert(routine)
    }

    /// Returns true if the routine changed
    pub fn move_up(&mut self, index: usize) -> bool {
        self.routine
            .as_mut()
            .map(|r| r.move_up(index))
            .unwrap_or(false)
    }

    /// Returns true if the routine changed
    pub fn move_down(&mut self, index: usize) -> bool {
        self.routine
            .as_mut()
            .map(|r| r.move_down(index))
            .unwrap_or(false)
    }

    pub fn reset(&mut self) {
        if let Some(routine) = self.routine.as_mut() {
            routine.reset();
        }
    }

    pub fn export_lines(&self) -> Option<String> {
        self.routine.as_ref().map(|r| r.export_lines())
    }

    pub fn summary(&self) -> Option<String> {
        self.routine.as_ref().map(|r| r.summary())
    }
}
