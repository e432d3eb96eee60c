//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences; `body_raw`, when present,
//! pins the exact bytes.

use live2d_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, InteractionResponse, Live2dClient, ModelCommand,
    TriggerAck,
};

const BASE_URL: &str = "http://localhost:8000/api/v1/live2d";

fn client() -> Live2dClient {
    Live2dClient::with_base_url(BASE_URL).unwrap()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected_req: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: url");

    let expected_headers: Vec<(String, String)> = expected_req["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let body = req.body.as_deref().unwrap();
    let req_body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(req_body, expected_req["body"], "{name}: body");
    if let Some(raw) = expected_req.get("body_raw") {
        assert_eq!(body, raw.as_str().unwrap(), "{name}: raw body");
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

fn check_error(name: &str, err: ApiError, expected: &str) {
    match expected {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound, got {err}"),
        "Http" => assert!(matches!(err, ApiError::Http { .. }), "{name}: expected Http, got {err}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

#[test]
fn interaction_test_vectors() {
    let raw = include_str!("../../test-vectors/interaction.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Verify build
        let req = c.build_post_interaction(&case["input"]).unwrap();
        check_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_interaction(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: InteractionResponse = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Trigger action
// ---------------------------------------------------------------------------

#[test]
fn trigger_action_test_vectors() {
    let raw = include_str!("../../test-vectors/trigger_action.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: ModelCommand = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_trigger_action(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_trigger_action(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let expected: TriggerAck = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}
