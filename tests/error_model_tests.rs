//! Error model unit tests

use jadugar::models::error::{ErrorModel, DEFAULT_STATUS};
use serde_json::json;

#[test]
fn test_full_error_object() {
    let error = ErrorModel::from_value(&json!({
        "id": "e-42",
        "status": "429",
        "code": "RATE_LIMITED",
        "title": "Too many requests",
        "detail": "Limit is 10 requests per second",
        "source": {"parameter": "page"},
        "links": {"about": "https://docs.jadugar.com/rate-limits"},
        "meta": {
            "platform_specific": {
                "handling_guide": "Back off before retrying",
                "recovery_suggestion": "Wait one second"
            },
            "retry_after": 1
        }
    }));

    assert_eq!(error.id(), Some("e-42"));
    assert_eq!(error.status(), 429);
    assert_eq!(error.code(), Some("RATE_LIMITED"));
    assert_eq!(error.title(), Some("Too many requests"));
    assert_eq!(error.detail(), Some("Limit is 10 requests per second"));
    assert_eq!(error.failure_reason(), Some("Limit is 10 requests per second"));
    assert_eq!(error.source(), Some(&json!({"parameter": "page"})));
    assert_eq!(
        error.links(),
        Some(&json!({"about": "https://docs.jadugar.com/rate-limits"}))
    );
    assert_eq!(error.meta()["retry_after"], 1);
    assert_eq!(error.handling_guide(), Some("Back off before retrying"));
    assert_eq!(error.recovery_suggestion(), Some("Wait one second"));
}

#[test]
fn test_empty_object_uses_defaults() {
    let error = ErrorModel::from_value(&json!({}));

    assert_eq!(error.status(), DEFAULT_STATUS);
    assert_eq!(error.id(), None);
    assert_eq!(error.code(), None);
    assert_eq!(error.title(), None);
    assert_eq!(error.detail(), None);
    assert_eq!(error.source(), None);
    assert_eq!(error.links(), None);
    assert!(error.meta().is_empty());
    assert_eq!(error.handling_guide(), None);
    assert_eq!(error.recovery_suggestion(), None);
    assert_eq!(error.to_string(), "");
}

#[test]
fn test_numeric_and_string_status() {
    assert_eq!(ErrorModel::from_value(&json!({"status": 404})).status(), 404);
    assert_eq!(ErrorModel::from_value(&json!({"status": "404"})).status(), 404);
}

#[test]
fn test_unparsable_status_falls_back_to_default() {
    for status in [json!("abc"), json!(""), json!(4.5), json!(true), json!({"code": 1})] {
        let error = ErrorModel::from_value(&json!({"status": status.clone()}));
        assert_eq!(error.status(), 500, "status {:?}", status);
    }
}

#[test]
fn test_meta_without_platform_specific() {
    let error = ErrorModel::from_value(&json!({"meta": {"request": "r-1"}}));

    assert_eq!(error.meta()["request"], "r-1");
    assert_eq!(error.handling_guide(), None);
    assert_eq!(error.recovery_suggestion(), None);
}

#[test]
fn test_partial_platform_specific() {
    let error = ErrorModel::from_value(&json!({
        "meta": {"platform_specific": {"recovery_suggestion": "Sign in again"}}
    }));

    assert_eq!(error.handling_guide(), None);
    assert_eq!(error.recovery_suggestion(), Some("Sign in again"));
}

#[test]
fn test_malformed_meta_is_treated_as_empty() {
    let error = ErrorModel::from_value(&json!({"code": "X", "meta": "not a map"}));
    assert!(error.meta().is_empty());
    assert_eq!(error.code(), Some("X"));

    let error = ErrorModel::from_value(&json!({"meta": {"platform_specific": ["a"]}}));
    assert_eq!(error.handling_guide(), None);
    assert_eq!(error.meta()["platform_specific"], json!(["a"]));
}

#[test]
fn test_non_string_guidance_is_absent() {
    let error = ErrorModel::from_value(&json!({
        "meta": {"platform_specific": {"handling_guide": 7, "recovery_suggestion": null}}
    }));

    assert_eq!(error.handling_guide(), None);
    assert_eq!(error.recovery_suggestion(), None);
}

#[test]
fn test_empty_strings_are_kept() {
    let error = ErrorModel::from_value(&json!({"title": "", "detail": ""}));
    assert_eq!(error.title(), Some(""));
    assert_eq!(error.detail(), Some(""));
}

#[test]
fn test_non_object_input() {
    let error = ErrorModel::from_value(&json!("boom"));
    assert_eq!(error.status(), 500);
    assert_eq!(error.code(), None);
}

#[test]
fn test_from_error_document_takes_first_entry() {
    let document = json!({
        "errors": [
            {"code": "FIRST", "title": "First"},
            {"code": "SECOND", "title": "Second"}
        ]
    });

    let error = ErrorModel::from_error_document(&document).unwrap();
    assert_eq!(error.code(), Some("FIRST"));
    assert_eq!(error.title(), Some("First"));
}

#[test]
fn test_from_error_document_without_usable_errors() {
    assert!(ErrorModel::from_error_document(&json!({})).is_none());
    assert!(ErrorModel::from_error_document(&json!({"errors": []})).is_none());
    assert!(ErrorModel::from_error_document(&json!({"errors": "oops"})).is_none());
    assert!(ErrorModel::from_error_document(&json!([{"code": "X"}])).is_none());
}

#[test]
fn test_from_value_reference() {
    let value = json!({"status": 418, "title": "Teapot"});
    let error: ErrorModel = (&value).into();
    assert_eq!(error.status(), 418);
    assert_eq!(error.to_string(), "Teapot");
}
