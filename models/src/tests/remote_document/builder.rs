use crate::RemoteDocumentBuilder;
use crate::error::model_error::ModelError;

use serde_json::json;

/// **VALUE**: Verifies that the builder rejects construction without a source URL.
///
/// **WHY THIS MATTERS**: Downstream code (diagnostics, logging) assumes every
/// document knows where it came from. A URL-less document would produce
/// useless "Failed to load :" style messages.
///
/// **BUG THIS CATCHES**: Would catch if someone makes `source_url` optional in
/// the builder without updating the consumers that format it.
#[test]
fn given_missing_source_url_when_build_called_then_returns_validation_error() {
    // GIVEN: A builder with only a body
    let builder = RemoteDocumentBuilder::default().with_body(json!({}));

    // WHEN: Building
    let result = builder.build();

    // THEN: Should fail validation mentioning the URL
    let err = result.expect_err("Build should fail without a source URL");
    assert!(
        matches!(err, ModelError::Validation { .. }),
        "Should be a validation error"
    );
    assert!(err.to_string().contains("Source URL"));
}

/// **VALUE**: Verifies that the empty string is rejected as a source URL.
///
/// **BUG THIS CATCHES**: Would catch if the presence check is reduced to
/// `is_some()`, letting empty targets flow through to the loader.
#[test]
fn given_empty_source_url_when_build_called_then_returns_validation_error() {
    // GIVEN: A builder with an empty URL
    let builder = RemoteDocumentBuilder::default()
        .with_source_url("")
        .with_body(json!({}));

    // WHEN: Building
    let result = builder.build();

    // THEN: Should fail validation
    assert!(result.is_err(), "Empty source URL should be rejected");
}

/// **VALUE**: Verifies the http/https scheme requirement.
///
/// **BUG THIS CATCHES**: Would catch if file:// or ftp:// targets start being
/// accepted, which the HTTP loader can never actually fetch.
#[test]
fn given_non_http_scheme_when_build_called_then_returns_validation_error() {
    // GIVEN: A builder with an ftp URL
    let builder = RemoteDocumentBuilder::default()
        .with_source_url("ftp://127.0.0.1/test.json")
        .with_body(json!({}));

    // WHEN: Building
    let result = builder.build();

    // THEN: Should fail validation naming the bad URL
    let err = result.expect_err("Non-http scheme should be rejected");
    assert!(err.to_string().contains("ftp://127.0.0.1/test.json"));
}

/// **VALUE**: Verifies that a body is required.
///
/// **BUG THIS CATCHES**: Would catch a refactor that defaults a missing body to
/// `null`, silently turning decode bugs into "null" output.
#[test]
fn given_missing_body_when_build_called_then_returns_validation_error() {
    // GIVEN: A builder with only a URL
    let builder =
        RemoteDocumentBuilder::default().with_source_url("http://127.0.0.1/test.json");

    // WHEN: Building
    let result = builder.build();

    // THEN: Should fail validation mentioning the body
    let err = result.expect_err("Build should fail without a body");
    assert!(err.to_string().contains("Body"));
}

/// Happy path: both fields present and valid.
#[test]
fn given_valid_fields_when_build_called_then_returns_document() {
    let document = RemoteDocumentBuilder::default()
        .with_source_url("https://example.test/data.json")
        .with_body(json!({"a": 1}))
        .build()
        .expect("Valid builder should produce a document");

    assert_eq!(document.source_url, "https://example.test/data.json");
    assert_eq!(document.body, json!({"a": 1}));
}
