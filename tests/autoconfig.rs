//! Tests for connection auto-configuration.
mod common;
use brickflow::prelude::*;
use common::*;
use serde_json::json;

fn default_review() -> Brick {
    brick("r1", BrickCategory::Review, "Review Document")
}

#[test]
fn test_doc_to_review_relabels_and_links() {
    let source = brick("d1", BrickCategory::Documentation, "Generate NDA");
    let target = default_review();

    let patch = configure_connection(&source, &target, None);
    assert_eq!(patch.label.as_deref(), Some("Review NDA"));
    assert_eq!(
        patch.config,
        vec![("document_id".to_string(), json!("d1"))]
    );
}

#[test]
fn test_template_short_name_preferred_over_label() {
    let mut source = brick("d1", BrickCategory::Documentation, "Generate Document");
    source
        .config
        .insert("template_id".to_string(), json!("tpl-123"));
    let templates = StaticTemplates::new().with_template("tpl-123", "MSA", "Body");

    let patch = configure_connection(&source, &default_review(), Some(&templates));
    assert_eq!(patch.label.as_deref(), Some("Review MSA"));
}

#[test]
fn test_without_directory_subject_comes_from_label() {
    let mut source = brick("d1", BrickCategory::Documentation, "Draft Lease Agreement");
    source
        .config
        .insert("template_id".to_string(), json!("tpl-123"));

    let patch = configure_connection(&source, &default_review(), None);
    assert_eq!(patch.label.as_deref(), Some("Review Lease Agreement"));
}

#[test]
fn test_customized_label_is_never_replaced() {
    let source = brick("d1", BrickCategory::Documentation, "Generate NDA");
    let target = brick("r1", BrickCategory::Review, "Legal Review");

    let patch = configure_connection(&source, &target, None);
    assert!(patch.label.is_none());
    // The document link is still wired up.
    assert_eq!(
        patch.config,
        vec![("document_id".to_string(), json!("d1"))]
    );
}

#[test]
fn test_existing_config_is_never_overwritten() {
    let source = brick("d1", BrickCategory::Documentation, "Generate NDA");

    let mut target = default_review();
    target
        .config
        .insert("document_id".to_string(), json!("other-doc"));
    assert!(
        configure_connection(&source, &target, None)
            .config
            .is_empty()
    );

    // Null and empty-string values count as unset.
    target.config.insert("document_id".to_string(), json!(null));
    let patch = configure_connection(&source, &target, None);
    assert_eq!(
        patch.config,
        vec![("document_id".to_string(), json!("d1"))]
    );

    target.config.insert("document_id".to_string(), json!(""));
    let patch = configure_connection(&source, &target, None);
    assert_eq!(
        patch.config,
        vec![("document_id".to_string(), json!("d1"))]
    );
}

#[test]
fn test_doc_to_commitment_wires_document_source() {
    let source = brick("d1", BrickCategory::Documentation, "Generate NDA");
    let target = brick("s1", BrickCategory::Commitment, "Collect Signature");

    let patch = configure_connection(&source, &target, None);
    assert!(patch.label.is_none());
    assert_eq!(
        patch.config,
        vec![
            ("document_source".to_string(), json!("previous_brick")),
            ("document_id".to_string(), json!("d1")),
        ]
    );
}

#[test]
fn test_doc_to_approval_links_document_only() {
    let source = brick("d1", BrickCategory::Documentation, "Generate NDA");
    let target = brick("ap1", BrickCategory::Approval, "Request Approval");

    let patch = configure_connection(&source, &target, None);
    assert!(patch.label.is_none());
    assert_eq!(
        patch.config,
        vec![("document_id".to_string(), json!("d1"))]
    );
}

#[test]
fn test_collection_to_review_relabels_only() {
    let source = brick("c1", BrickCategory::Collection, "Gather Deal Facts");

    let patch = configure_connection(&source, &default_review(), None);
    assert_eq!(patch.label.as_deref(), Some("Review Deal Facts"));
    assert!(patch.config.is_empty());
}

#[test]
fn test_verb_stripping_rules() {
    let subject = |label: &str| {
        let source = brick("c1", BrickCategory::Collection, label);
        configure_connection(&source, &default_review(), None)
            .label
            .expect("default review label should be replaced")
    };

    assert_eq!(subject("Collect Signatures"), "Review Signatures");
    assert_eq!(subject("GATHER facts"), "Review facts");
    // A single word has nothing to strip, verb or not.
    assert_eq!(subject("NDA"), "Review NDA");
    assert_eq!(subject("Collect"), "Review Collect");
    // Unknown leading words stay.
    assert_eq!(subject("Deal Facts"), "Review Deal Facts");
}

#[test]
fn test_unmatched_pair_yields_empty_patch() {
    let source = brick("r1", BrickCategory::Review, "Review NDA");
    let target = brick("ap1", BrickCategory::Approval, "Request Approval");

    assert!(configure_connection(&source, &target, None).is_empty());
}
