//! The user's reorderable routine for the current session.
//!
//! Reordering only ever swaps adjacent poses, so the list is always a
//! permutation of the routine the catalog assigned to the pain area.

use crate::{ClassificationResult, PainArea, PoseCatalog, PoseName};

/// Mutable, ordered list of poses derived from one classification
#[derive(Clone, Debug)]
pub struct RoutineState<'c> {
    catalog: &'c PoseCatalog,
    pain_area: PainArea,
    poses: Vec<PoseName>,
}

impl<'c> RoutineState<'c> {
    /// Start a routine from a classification
    pub fn new(catalog: &'c PoseCatalog, classification: ClassificationResult) -> Self {
        tracing::debug!(
            "Routine initialized for {} with {} poses",
            classification.pain_area,
            classification.poses.len()
        );
        Self {
            catalog,
            pain_area: classification.pain_area,
            poses: classification.poses,
        }
    }

    /// Replace the whole state with a new classification
    pub fn initialize(&mut self, classification: ClassificationResult) {
        *self = Self::new(self.catalog, classification);
    }

    pub fn pain_area(&self) -> &PainArea {
        &self.pain_area
    }

    pub fn poses(&self) -> &[PoseName] {
        &self.poses
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Swap the pose at `index` with the one before it
    ///
    /// Returns false (and changes nothing) for the first position or an
    /// index past the end.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.poses.len() {
            tracing::debug!("move_up({}) ignored", index);
            return false;
        }
        self.poses.swap(index, index - 1);
        tracing::debug!("Moved '{}' up to position {}", self.poses[index - 1], index);
        true
    }

    /// Swap the pose at `index` with the one after it
    ///
    /// Returns false (and changes nothing) for the last position or an
    /// index past the end.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index >= self.poses.len().saturating_sub(1) {
            tracing::debug!("move_down({}) ignored", index);
            return false;
        }
        self.poses.swap(index, index + 1);
        tracing::debug!(
            "Moved '{}' down to position {}",
            self.poses[index + 1],
            index + 2
        );
        true
    }

    /// Restore the catalog's original order for the current pain area
    pub fn reset(&mut self) {
        self.poses = self.catalog.poses_for(&self.pain_area).to_vec();
        tracing::debug!("Routine reset for {}", self.pain_area);
    }

    /// Numbered lines, e.g. "1. Cat-Cow\n2. Child's Pose"
    pub fn export_lines(&self) -> String {
        self.numbered().collect::<Vec<_>>().join("\n")
    }

    /// Single-line summary, e.g. "1. Cat-Cow → 2. Child's Pose"
    pub fn summary(&self) -> String {
        self.numbered().collect::<Vec<_>>().join(" → ")
    }

    fn numbered(&self) -> impl Iterator<Item = String> + '_ {
        self.poses
            .iter()
            .enumerate()
            .map(|(i, pose)| format!("{}. {}", i + 1, pose))
    }
}
