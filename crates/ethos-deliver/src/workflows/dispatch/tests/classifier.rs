use super::common::*;
use std::sync::Arc;

use crate::workflows::dispatch::classifier::{ClassifierUnavailable, MODEL_CLASSIFIED_MARKER};
use crate::workflows::dispatch::domain::{ContextSource, DomainCategory, FallbackAttempt};
use crate::workflows::dispatch::knowledge::KnowledgeBase;
use crate::workflows::dispatch::{ContextClassifier, DeliveryInput};

#[test]
fn medical_keywords_win_over_lower_priority_domains() {
    let fallback = Arc::new(ScriptedClassifier::ranked(&[("EMERGENCY", 0.9)]));
    let classifier = classifier_with(fallback.clone());

    let context = analyze(
        &classifier,
        "Baby food and insulin pens for the flood relief shelter",
    );

    assert_eq!(context.domain, DomainCategory::Medical);
    assert_eq!(context.detected_keywords, vec!["insulin".to_string()]);
    assert_eq!(context.source, ContextSource::KeywordMatch);
    assert_eq!(context.fallback, FallbackAttempt::NotAttempted);
    assert!(context.is_human_dependent);
    assert!(fallback.calls().is_empty(), "fallback must not be consulted");
}

#[test]
fn every_matching_keyword_of_the_winning_domain_is_recorded_in_table_order() {
    let classifier = classifier_with(Arc::new(ScriptedClassifier::ranked(&[])));

    let context = analyze(&classifier, "OXYGEN tanks and blood bags for the hospital");

    assert_eq!(context.domain, DomainCategory::Medical);
    assert_eq!(
        context.detected_keywords,
        vec![
            "blood".to_string(),
            "hospital".to_string(),
            "oxygen".to_string()
        ]
    );
}

#[test]
fn keywords_match_as_substrings_after_case_folding() {
    let classifier = classifier_with(Arc::new(ScriptedClassifier::ranked(&[])));

    let context = analyze(&classifier, "Replacement WATERPROOF tarps");

    assert_eq!(context.domain, DomainCategory::Essential);
    assert_eq!(context.detected_keywords, vec!["water".to_string()]);
    assert!(!context.is_human_dependent);
}

#[test]
fn explicit_priority_order_changes_the_tie_break() {
    let knowledge = KnowledgeBase::standard().with_domain_priority(vec![
        DomainCategory::Essential,
        DomainCategory::Emergency,
        DomainCategory::Medical,
    ]);
    let classifier = ContextClassifier::new(
        Arc::new(knowledge),
        Arc::new(ScriptedClassifier::ranked(&[])),
    );

    let context = classifier.analyze(&DeliveryInput::new("Insulin and baby formula"));

    assert_eq!(context.domain, DomainCategory::Essential);
    assert_eq!(context.detected_keywords, vec!["baby".to_string()]);
}

#[test]
fn fallback_verdict_is_adopted_with_marker() {
    let fallback = Arc::new(ScriptedClassifier::ranked(&[
        ("MEDICAL", 0.82),
        ("GENERAL", 0.1),
    ]));
    let classifier = classifier_with(fallback.clone());

    let context = analyze(&classifier, "My EpiPen is broken");

    assert_eq!(context.domain, DomainCategory::Medical);
    assert_eq!(
        context.detected_keywords,
        vec![MODEL_CLASSIFIED_MARKER.to_string()]
    );
    assert_eq!(context.source, ContextSource::ModelFallback);
    assert!(context.is_human_dependent);
    assert!(matches!(
        context.fallback,
        FallbackAttempt::Adopted {
            label: DomainCategory::Medical,
            ..
        }
    ));

    let calls = fallback.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "my epipen is broken");
    assert_eq!(
        calls[0].1,
        vec!["MEDICAL", "EMERGENCY", "ESSENTIAL", "GENERAL"]
    );
}

#[test]
fn best_label_is_chosen_by_score_not_position() {
    let classifier = classifier_with(Arc::new(ScriptedClassifier::ranked(&[
        ("GENERAL", 0.2),
        ("emergency", 0.7),
    ])));

    let context = analyze(&classifier, "Sandbags for the riverside");

    assert_eq!(context.domain, DomainCategory::Emergency);
}

#[test]
fn general_verdict_leaves_keywords_empty_but_is_audited() {
    let classifier = classifier_with(Arc::new(ScriptedClassifier::ranked(&[
        ("GENERAL", 0.91),
        ("ESSENTIAL", 0.05),
    ])));

    let context = analyze(&classifier, "PlayStation 5 console");

    assert_eq!(context.domain, DomainCategory::General);
    assert!(context.detected_keywords.is_empty());
    assert_eq!(context.source, ContextSource::Default);
    assert_eq!(
        context.fallback,
        FallbackAttempt::ReturnedGeneral { confidence: 0.91 }
    );
}

#[test]
fn unavailable_fallback_degrades_to_general() {
    for reason in [
        ClassifierUnavailable::MissingCredential,
        ClassifierUnavailable::Timeout,
        ClassifierUnavailable::Status(503),
        ClassifierUnavailable::MalformedResponse("not json".to_string()),
    ] {
        let classifier = classifier_with(Arc::new(ScriptedClassifier::unavailable(
            reason.clone(),
        )));

        let context = analyze(&classifier, "Box of school textbooks");

        assert_eq!(context.domain, DomainCategory::General);
        assert!(context.detected_keywords.is_empty());
        assert!(!context.is_human_dependent);
        assert_eq!(
            context.fallback,
            FallbackAttempt::Unavailable {
                reason: reason.to_string()
            }
        );
    }
}

#[test]
fn unknown_or_empty_fallback_results_degrade_to_general() {
    for fallback in [
        ScriptedClassifier::ranked(&[("FURNITURE", 0.99)]),
        ScriptedClassifier::ranked(&[]),
    ] {
        let classifier = classifier_with(Arc::new(fallback));
        let context = analyze(&classifier, "Oak bookshelf");

        assert_eq!(context.domain, DomainCategory::General);
        assert!(context.detected_keywords.is_empty());
        assert!(matches!(
            context.fallback,
            FallbackAttempt::Unavailable { .. }
        ));
    }
}
