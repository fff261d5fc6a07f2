//! Core domain types for the Yoga Pose Suggester.
//!
//! This module defines the fundamental types used throughout the system:
//! - Pain areas and pose names
//! - Catalog entries
//! - Classification results
//! - Recorded audio handles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Name of a single yoga pose (e.g., "Cat-Cow")
pub type PoseName = String;

/// Label used when no catalog keyword matched
pub const GENERAL_AREA: &str = "general";

// ============================================================================
// Pain Areas
// ============================================================================

/// Body region a routine was derived from
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PainArea {
    /// A catalog keyword, stored lower-case (e.g., "lower back")
    Named(String),
    /// No keyword matched; the default routine applies
    General,
}

impl PainArea {
    /// Lower-case key as stored in the catalog, or "general"
    pub fn key(&self) -> &str {
        match self {
            PainArea::Named(area) => area,
            PainArea::General => GENERAL_AREA,
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, PainArea::General)
    }

    /// Title-cased label for display ("lower back" -> "Lower Back")
    pub fn title(&self) -> String {
        title_case(self.key())
    }
}

impl fmt::Display for PainArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Capitalize the first letter of every whitespace-separated word
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Catalog Types
// ============================================================================

/// One keyword and the poses prescribed for it, in their original order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub area: String,
    pub poses: Vec<PoseName>,
}

impl CatalogEntry {
    pub fn new(area: &str, poses: &[&str]) -> Self {
        Self {
            area: area.into(),
            poses: poses.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Outcome of matching transcribed text against the catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassificationResult {
    pub pain_area: PainArea,
    pub poses: Vec<PoseName>,
}

// ============================================================================
// Audio
// ============================================================================

/// A finished recording on disk, ready for transcription
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioHandle {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub samples: usize,
}

impl AudioHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sample_rate: 0,
            samples: 0,
        }
    }
}
