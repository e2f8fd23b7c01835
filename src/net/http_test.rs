use super::*;

#[test]
fn new_request_defaults_to_json_content_type() {
    let request = ApiRequest::get("/tasks");
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.path, "/tasks");
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert!(request.body.is_none());
}

#[test]
fn verb_constructors_set_method() {
    assert_eq!(ApiRequest::post("/x").method, Method::Post);
    assert_eq!(ApiRequest::put("/x").method, Method::Put);
    assert_eq!(ApiRequest::delete("/x").method, Method::Delete);
}

#[test]
fn method_displays_uppercase_verb() {
    assert_eq!(Method::Delete.to_string(), "DELETE");
    assert_eq!(Method::Get.to_string(), "GET");
}

#[test]
fn json_encodes_body() {
    let request = ApiRequest::post("/auth/login")
        .json(&serde_json::json!({"username": "ana"}))
        .unwrap();
    assert_eq!(request.body.as_deref(), Some(r#"{"username":"ana"}"#));
}

#[test]
fn with_header_replaces_case_insensitively() {
    let request = ApiRequest::get("/tasks")
        .with_header("authorization", "Bearer old")
        .with_header(AUTHORIZATION, "Bearer new");
    let matching: Vec<_> = request
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case(AUTHORIZATION))
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer new"));
}

#[test]
fn response_success_range() {
    assert!(ApiResponse::new(200, "").is_success());
    assert!(ApiResponse::new(204, "").is_success());
    assert!(!ApiResponse::new(301, "").is_success());
    assert!(!ApiResponse::new(401, "").is_success());
}

#[test]
fn offline_transport_always_fails_with_network_error() {
    let result = futures::executor::block_on(OfflineTransport.send("http://x/tasks".to_owned(), ApiRequest::get("/tasks")));
    assert_eq!(result, Err(ApiError::Network("no transport available for http://x/tasks".to_owned())));
}
