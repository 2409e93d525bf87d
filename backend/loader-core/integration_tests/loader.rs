// Public API tests for the HTTP loader against a local mock server.
// These test the PUBLIC interface from an external consumer's perspective.

use loader_core::error::loader::LoaderError;
use loader_core::loader::{DEFAULT_TIMEOUT_DURATION, DocumentLoader, JsonLoader};

use common::HttpStatusCode;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn loader() -> JsonLoader {
    JsonLoader::new(DEFAULT_TIMEOUT_DURATION).expect("loader should construct")
}

/// **VALUE**: Verifies the happy path: a 200 JSON response decodes into a
/// document carrying the parsed value.
///
/// **WHY THIS MATTERS**: This is the one behavior the whole component
/// exists for. A regression here is a total outage, not an edge case.
///
/// **BUG THIS CATCHES**: Would catch status handling, body reading, or JSON
/// decoding breaking anywhere along the load path.
#[tokio::test]
async fn given_200_json_response_when_load_called_then_returns_parsed_document() {
    // GIVEN: A server answering 200 with {"a":1}
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a":1}"#, "application/json"))
        .mount(&server)
        .await;

    // WHEN: Loading
    let url = format!("{}/test.json", server.uri());
    let document = loader().load(&url).await.expect("Load should succeed");

    // THEN: The body is the parsed value and the source URL is recorded
    assert_eq!(document.body, json!({"a": 1}));
    assert_eq!(document.source_url, url);
}

/// **VALUE**: Verifies a 404 surfaces as an HTTP failure carrying the code.
///
/// **WHY THIS MATTERS**: The Reporter builds its "contains 404" diagnostic
/// from this error; a lost or mangled status breaks the user-facing message.
///
/// **BUG THIS CATCHES**: Would catch if non-2xx responses are decoded as
/// JSON anyway, or the status is dropped during error construction.
#[tokio::test]
async fn given_404_response_when_load_called_then_returns_http_error_with_status() {
    // GIVEN: A server answering 404
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    // WHEN: Loading
    let url = format!("{}/missing.json", server.uri());
    let error = loader().load(&url).await.expect_err("Load should fail");

    // THEN: The failure is Http with status 404, categorized as client error
    let status = error.status().expect("Should carry a status code");
    assert_eq!(status, HttpStatusCode::from(404));
    assert!(status.is_client_error());
    assert!(matches!(error, LoaderError::Http { .. }));
}

/// 5xx statuses are HTTP failures too, categorized as server errors.
#[tokio::test]
async fn given_500_response_when_load_called_then_returns_http_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = format!("{}/broken.json", server.uri());
    let error = loader().load(&url).await.expect_err("Load should fail");

    assert!(error.status().expect("Should carry a status").is_server_error());
}

/// **VALUE**: Verifies a 200 response with a non-JSON body is a decode
/// failure, distinct from network and HTTP failures.
///
/// **BUG THIS CATCHES**: Would catch if decode failures get folded into a
/// generic error, losing the distinction the diagnostics rely on.
#[tokio::test]
async fn given_200_non_json_body_when_load_called_then_returns_decode_error() {
    // GIVEN: A server answering 200 with a body that is not JSON
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/test.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    // WHEN: Loading
    let url = format!("{}/test.json", server.uri());
    let error = loader().load(&url).await.expect_err("Load should fail");

    // THEN: The failure is Decode
    assert!(matches!(error, LoaderError::Decode { .. }));
}

/// **VALUE**: Verifies idempotence: two loads of unchanged remote content
/// yield structurally equal documents.
///
/// **WHY THIS MATTERS**: Loads are stateless by contract - no caching, no
/// accumulation. Equal inputs must produce equal outputs.
///
/// **BUG THIS CATCHES**: Would catch per-call state (counters, timestamps)
/// leaking into the document model.
#[tokio::test]
async fn given_unchanged_content_when_loaded_twice_then_documents_are_equal() {
    // GIVEN: A server with stable content
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"[{"id":"1","title":"Dune"}]"#, "application/json"),
        )
        .mount(&server)
        .await;

    // WHEN: Loading twice
    let url = format!("{}/books", server.uri());
    let the_loader = loader();
    let first = the_loader.load(&url).await.expect("First load should succeed");
    let second = the_loader.load(&url).await.expect("Second load should succeed");

    // THEN: The documents compare equal
    assert_eq!(first, second);
}

/// **VALUE**: Verifies connection failures surface as Network errors instead
/// of panics or hangs.
///
/// **WHY THIS MATTERS**: Unreachable servers are an everyday condition. The
/// loader must return a typed failure the Reporter can render.
///
/// **BUG THIS CATCHES**: Would catch an unwrap creeping into the request
/// path, which would panic on any refused connection.
#[tokio::test]
async fn given_unreachable_server_when_load_called_then_returns_network_error() {
    // GIVEN: A port that definitely has no server listening
    let url = "http://127.0.0.1:65534/test.json";

    // WHEN: Loading
    let error = loader().load(url).await.expect_err("Load should fail");

    // THEN: The failure is Network
    assert!(matches!(error, LoaderError::Network { .. }));
}
