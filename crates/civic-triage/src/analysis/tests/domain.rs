use super::common::*;
use serde_json::json;

use crate::analysis::domain::{Category, CategoryScores, ClassifiedComplaint, ResolutionError};

#[test]
fn resolves_highest_confidence_category() {
    let scores = scores(&[("DECHETS", 0.15), ("AGRESSION", 0.7), ("AUTRES", 0.15)]);
    let category = scores.resolve_category().expect("non-empty scores");
    assert_eq!(category.as_str(), "AGRESSION");
}

#[test]
fn equal_confidence_resolves_to_earliest_declared_category() {
    // VOL is declared before CORRUPTION, AGRESSION before both.
    let tied = scores(&[("CORRUPTION", 0.5), ("VOL", 0.5)]);
    assert_eq!(
        tied.resolve_category().expect("non-empty").as_str(),
        "VOL"
    );

    let tied = scores(&[("VOL", 0.5), ("AGRESSION", 0.5)]);
    assert_eq!(
        tied.resolve_category().expect("non-empty").as_str(),
        "AGRESSION"
    );
}

#[test]
fn unknown_labels_rank_after_declared_ones() {
    let tied = scores(&[("AAA_CUSTOM", 0.5), ("AUTRES", 0.5)]);
    assert_eq!(
        tied.resolve_category().expect("non-empty").as_str(),
        "AUTRES"
    );

    // Two unknown labels fall back to lexicographic order.
    let tied = scores(&[("ZONE_TEST", 0.5), ("ABUS", 0.5)]);
    assert_eq!(tied.resolve_category().expect("non-empty").as_str(), "ABUS");
}

#[test]
fn strictly_greater_confidence_still_wins_over_tie_break() {
    let scores = scores(&[("AGRESSION", 0.4), ("VOIRIE", 0.6)]);
    assert_eq!(
        scores.resolve_category().expect("non-empty").as_str(),
        "VOIRIE"
    );
}

#[test]
fn empty_scores_are_rejected() {
    let empty = CategoryScores::default();
    assert!(matches!(
        empty.resolve_category(),
        Err(ResolutionError::EmptyScores)
    ));
}

#[test]
fn from_scores_pins_category_to_argmax() {
    let complaint = ClassifiedComplaint::from_scores(
        "dépôt sauvage près du canal",
        scores(&[("DECHETS", 0.8), ("POLLUTION", 0.2)]),
    )
    .expect("non-empty scores");
    assert_eq!(complaint.category.as_str(), "DECHETS");
    assert_eq!(complaint.localisation, "Inconnue");
    assert!(complaint.zone.is_none());
}

#[test]
fn wire_records_default_missing_fields() {
    let complaint: ClassifiedComplaint =
        serde_json::from_value(json!({ "zone": "Agdal" })).expect("deserializes");
    assert_eq!(complaint.description, "");
    assert_eq!(complaint.category, Category::autres());
    assert!(complaint.category_scores.is_empty());
    assert_eq!(complaint.localisation, "Inconnue");
    assert_eq!(complaint.zone.as_deref(), Some("Agdal"));
    assert!(complaint.timestamp.is_none());
}

#[test]
fn category_serializes_as_bare_string() {
    assert_eq!(
        serde_json::to_value(Category::from("VOIRIE")).expect("serializes"),
        json!("VOIRIE")
    );
    let scores = scores(&[("AUTRES", 1.0)]);
    assert_eq!(
        serde_json::to_value(scores).expect("serializes"),
        json!({ "AUTRES": 1.0 })
    );
}
