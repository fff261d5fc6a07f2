//! Default catalog of pain areas and their pose routines.
//!
//! Entry order matters: the classifier reports the first keyword found in the
//! text, scanning entries in the order they are declared here.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Number of poses every catalog routine carries
pub const POSES_PER_ROUTINE: usize = 5;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<PoseCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static PoseCatalog {
    &DEFAULT_CATALOG
}

/// Immutable, ordered table of pain-area keywords to pose routines
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoseCatalog {
    entries: Vec<CatalogEntry>,
    default_routine: Vec<PoseName>,
}

/// Builds the default catalog with the built-in pain areas
pub fn build_default_catalog() -> PoseCatalog {
    let back = [
        "Cat-Cow",
        "Child's Pose",
        "Cobra Pose",
        "Bridge Pose",
        "Knees-to-Chest",
    ];

    // "lower back" must precede "back" so the more specific phrase wins
    let entries = vec![
        CatalogEntry::new("lower back", &back),
        CatalogEntry::new("back", &back),
        CatalogEntry::new(
            "shoulder",
            &[
                "Thread the Needle",
                "Eagle Arms",
                "Cow Face Pose",
                "Reverse Prayer",
                "Shoulder Rolls",
            ],
        ),
        CatalogEntry::new(
            "neck",
            &[
                "Neck Rolls",
                "Chin Tucks",
                "Ear-to-Shoulder",
                "Thread the Needle",
                "Cat-Cow",
            ],
        ),
        CatalogEntry::new(
            "knee",
            &["Hero Pose", "Bridge Pose", "Wall Sit", "Chair Pose", "Low Lunge"],
        ),
        CatalogEntry::new(
            "wrist",
            &[
                "Wrist Flexor Stretch",
                "Wrist Circles",
                "Prayer Stretch",
                "Table Top",
                "Downward Dog",
            ],
        ),
        CatalogEntry::new(
            "hip",
            &[
                "Pigeon Pose",
                "Garland Pose",
                "Lizard Pose",
                "Butterfly Pose",
                "Bridge Pose",
            ],
        ),
        CatalogEntry::new(
            "ankle",
            &[
                "Seated Ankle Stretch",
                "Downward Dog",
                "Standing Calf Stretch",
                "Hero Pose",
                "Toe Squat",
            ],
        ),
    ];

    let default_routine = [
        "Mountain Pose",
        "Tree Pose",
        "Corpse Pose",
        "Butterfly Pose",
        "Legs Up the Wall",
    ]
    .iter()
    .map(|p| (*p).to_string())
    .collect();

    PoseCatalog {
        entries,
        default_routine,
    }
}

impl PoseCatalog {
    /// Build a catalog from explicit entries and a default routine
    pub fn new(entries: Vec<CatalogEntry>, default_routine: Vec<PoseName>) -> Self {
        Self {
            entries,
            default_routine,
        }
    }

    /// Extend this catalog with user-defined entries
    ///
    /// Custom entries are appended after the existing ones, so they never
    /// change which built-in keyword wins a tie. Keys are normalized to
    /// trimmed lower-case.
    pub fn with_custom(&self, custom: &[CatalogEntry]) -> Self {
        let mut catalog = self.clone();
        for entry in custom {
            tracing::debug!("Adding custom pain area {:?}", entry.area);
            catalog.entries.push(CatalogEntry {
                area: entry.area.trim().to_lowercase(),
                poses: entry.poses.clone(),
            });
        }
        catalog
    }

    /// Entries in declared (matching) order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Pain-area keywords in declared order
    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.area.as_str())
    }

    pub fn default_routine(&self) -> &[PoseName] {
        &self.default_routine
    }

    /// Case-insensitive lookup of a single keyword
    pub fn lookup(&self, area: &str) -> Option<&CatalogEntry> {
        let key = area.trim().to_lowercase();
        self.entries.iter().find(|e| e.area == key)
    }

    /// Original pose order for a pain area
    ///
    /// Unknown named areas fall back to the default routine, same as "general".
    pub fn poses_for(&self, area: &PainArea) -> &[PoseName] {
        match area {
            PainArea::Named(key) => self
                .lookup(key)
                .map(|e| e.poses.as_slice())
                .unwrap_or(&self.default_routine),
            PainArea::General => &self.default_routine,
        }
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for entry in &self.entries {
            let area = &entry.area;
            if area.trim().is_empty() {
                errors.push("Catalog entry has empty pain area".to_string());
                continue;
            }
            if *area != area.trim().to_lowercase() {
                errors.push(format!(
                    "Pain area '{}' must be trimmed lower-case",
                    area
                ));
            }
            if !seen.insert(area.as_str()) {
                errors.push(format!("Duplicate pain area '{}'", area));
            }
            if entry.poses.len() != POSES_PER_ROUTINE {
                errors.push(format!(
                    "Pain area '{}' has {} poses, expected {}",
                    area,
                    entry.poses.len(),
                    POSES_PER_ROUTINE
                ));
            }

            let mut poses = HashSet::new();
            for pose in &entry.poses {
                if pose.trim().is_empty() {
                    errors.push(format!("Pain area '{}' has an empty pose name", area));
                } else if !poses.insert(pose.as_str()) {
                    errors.push(format!(
                        "Pain area '{}' lists pose '{}' more than once",
                        area, pose
                    ));
                }
            }
        }

        if self.default_routine.is_empty() {
            errors.push("Catalog has no default routine".to_string());
        }
        if self.default_routine.iter().any(|p| p.trim().is_empty()) {
            errors.push("Default routine has an empty pose name".to_string());
        }

        errors
    }
}
