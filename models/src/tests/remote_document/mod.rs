mod builder;

use crate::RemoteDocumentBuilder;

use serde_json::json;

/// **VALUE**: Verifies that `canonical_text()` produces the compact, sorted-key form.
///
/// **WHY THIS MATTERS**: The Reporter promises that a successful load of `{"a":1}`
/// writes exactly the text `{"a":1}` to the sink. Any whitespace or key reordering
/// in the canonical form breaks that contract for every consumer.
///
/// **BUG THIS CATCHES**: Would catch if canonical rendering switches to the pretty
/// encoder, or if the JSON value type stops sorting object keys.
#[test]
fn given_simple_object_when_canonical_text_called_then_produces_compact_form() {
    // GIVEN: A document with a one-entry object body
    let document = RemoteDocumentBuilder::default()
        .with_source_url("http://127.0.0.1/test.json")
        .with_body(json!({"a": 1}))
        .build()
        .unwrap();

    // WHEN: Rendering the canonical text
    let text = document.canonical_text().unwrap();

    // THEN: Should be the exact compact form
    assert_eq!(text, r#"{"a":1}"#, "Canonical form should be compact");
}

/// **VALUE**: Verifies that object keys render in a stable order regardless of
/// the order they were decoded in.
///
/// **BUG THIS CATCHES**: Would catch a switch to an insertion-ordered map type,
/// which would make the canonical form depend on wire byte order.
#[test]
fn given_unordered_keys_when_canonical_text_called_then_keys_are_sorted() {
    // GIVEN: A body decoded with keys out of order
    let body: serde_json::Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
    let document = RemoteDocumentBuilder::default()
        .with_source_url("http://127.0.0.1/test.json")
        .with_body(body)
        .build()
        .unwrap();

    // WHEN: Rendering the canonical text
    let text = document.canonical_text().unwrap();

    // THEN: Keys should be sorted
    assert_eq!(text, r#"{"a":1,"b":2}"#);
}

/// **VALUE**: Verifies structural equality between documents built from the same
/// URL and content.
///
/// **WHY THIS MATTERS**: The idempotence property (two loads of unchanged remote
/// content yield equal results) is expressed through `PartialEq` on the model.
///
/// **BUG THIS CATCHES**: Would catch if a non-comparable field (timestamp, request
/// id) is added to the document without updating the equality contract.
#[test]
fn given_same_url_and_body_when_documents_built_then_they_compare_equal() {
    // GIVEN: Two documents built from identical inputs
    let build = || {
        RemoteDocumentBuilder::default()
            .with_source_url("http://127.0.0.1/books")
            .with_body(json!([{"id": "1", "title": "Dune"}]))
            .build()
            .unwrap()
    };

    // WHEN: Comparing them
    let first = build();
    let second = build();

    // THEN: Should be structurally equal
    assert_eq!(first, second, "Unchanged content should compare equal");
}

/// Scalar and sequence bodies are valid documents - the schema is opaque.
#[test]
fn given_scalar_body_when_canonical_text_called_then_renders_scalar() {
    let document = RemoteDocumentBuilder::default()
        .with_source_url("http://127.0.0.1/version")
        .with_body(json!(42))
        .build()
        .unwrap();

    assert_eq!(document.canonical_text().unwrap(), "42");
}

/// Pretty text is multi-line for objects; canonical text never is.
#[test]
fn given_object_body_when_pretty_text_called_then_output_is_indented() {
    let document = RemoteDocumentBuilder::default()
        .with_source_url("http://127.0.0.1/test.json")
        .with_body(json!({"a": 1}))
        .build()
        .unwrap();

    let pretty = document.pretty_text().unwrap();

    assert!(pretty.contains('\n'), "Pretty form should be multi-line");
    assert!(
        !document.canonical_text().unwrap().contains('\n'),
        "Canonical form should be single-line"
    );
}
