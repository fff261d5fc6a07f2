//! Pain-area classification of transcribed speech.
//!
//! Matching is a plain substring scan over the catalog keywords in declared
//! order. The first keyword contained anywhere in the lower-cased text wins,
//! regardless of where it appears. There is no word-boundary check, so
//! "anklet" matches "ankle".

use crate::{ClassificationResult, PainArea, PoseCatalog};

/// Classify free-form text into a pain area and its routine
pub fn classify(catalog: &PoseCatalog, text: &str) -> ClassificationResult {
    let text = text.to_lowercase();

    for entry in catalog.entries() {
        if text.contains(entry.area.as_str()) {
            tracing::info!("Detected pain area: {}", entry.area);
            return ClassificationResult {
                pain_area: PainArea::Named(entry.area.clone()),
                poses: entry.poses.clone(),
            };
        }
    }

    tracing::info!("No pain area keyword found, using general routine");
    ClassificationResult {
        pain_area: PainArea::General,
        poses: catalog.default_routine().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;

    fn area(result: &ClassificationResult) -> &str {
        result.pain_area.key()
    }

    #[test]
    fn test_lower_back_scenario() {
        let result = classify(get_default_catalog(), "My lower back hurts");
        assert_eq!(area(&result), "lower back");
        assert_eq!(
            result.poses,
            vec!["Cat-Cow", "Child's Pose", "Cobra Pose", "Bridge Pose", "Knees-to-Chest"]
        );
    }

    #[test]
    fn test_shoulder_scenario() {
        let result = classify(get_default_catalog(), "I have shoulder pain");
        assert_eq!(area(&result), "shoulder");
        assert_eq!(
            result.poses,
            vec![
                "Thread the Needle",
                "Eagle Arms",
                "Cow Face Pose",
                "Reverse Prayer",
                "Shoulder Rolls"
            ]
        );
    }

    #[test]
    fn test_no_keyword_is_general() {
        let catalog = get_default_catalog();
        let result = classify(catalog, "I feel great today");
        assert_eq!(result.pain_area, PainArea::General);
        assert_eq!(result.poses, catalog.default_routine());

        let result = classify(catalog, "");
        assert_eq!(result.pain_area, PainArea::General);
    }

    #[test]
    fn test_single_keyword_any_case_and_context() {
        let catalog = get_default_catalog();
        for entry in catalog.entries() {
            let shouting = format!("OUCH, my {} is KILLING me!!", entry.area.to_uppercase());
            let result = classify(catalog, &shouting);
            assert_eq!(area(&result), entry.area);
            assert_eq!(result.poses, entry.poses);
        }
    }

    #[test]
    fn test_catalog_order_wins_over_text_position() {
        let catalog = get_default_catalog();

        // "neck" appears first in the text but "back" is declared first
        let result = classify(catalog, "my neck and my back");
        assert_eq!(area(&result), "back");

        let result = classify(catalog, "ankle, then hip, then knee");
        assert_eq!(area(&result), "knee");

        let result = classify(catalog, "the lower back, not the upper back");
        assert_eq!(area(&result), "lower back");
    }

    #[test]
    fn test_substring_not_whole_word() {
        let catalog = get_default_catalog();
        assert_eq!(area(&classify(catalog, "my new anklet pinches")), "ankle");
        assert_eq!(area(&classify(catalog, "I hurt it on the backswing")), "back");
        assert_eq!(area(&classify(catalog, "he is hip")), "hip");
    }

    #[test]
    fn test_result_is_a_copy() {
        let catalog = get_default_catalog();
        let mut result = classify(catalog, "knee");
        result.poses.swap(0, 1);
        assert_eq!(catalog.lookup("knee").unwrap().poses[0], "Hero Pose");
    }
}
