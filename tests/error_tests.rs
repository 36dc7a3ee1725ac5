// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use calorie_advisor::error::AdvisorError;
use http_body_util::BodyExt;

#[test]
fn test_error_display_messages() {
    let errors = vec![
        AdvisorError::NoFileProvided,
        AdvisorError::UnsupportedContentType("application/pdf".to_string()),
        AdvisorError::ImageTooLarge { size: 30, max: 20 },
        AdvisorError::UploadTooLarge { max: 20 },
        AdvisorError::InferenceUnavailable("connection refused".to_string()),
        AdvisorError::InferenceRejected("blocked".to_string()),
        AdvisorError::InvalidRequest("Bad request".to_string()),
        AdvisorError::Config("missing key".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_unsupported_content_type_names_the_type() {
    let error = AdvisorError::UnsupportedContentType("application/pdf".to_string());
    assert!(format!("{}", error).contains("application/pdf"));
}

#[test]
fn test_only_unavailable_is_retryable() {
    assert!(AdvisorError::InferenceUnavailable("timeout".to_string()).is_retryable());
    assert!(!AdvisorError::InferenceRejected("too large".to_string()).is_retryable());
    assert!(!AdvisorError::NoFileProvided.is_retryable());
    assert!(!AdvisorError::UnsupportedContentType("image/gif".to_string()).is_retryable());
}

#[test]
fn test_status_codes() {
    assert_eq!(AdvisorError::NoFileProvided.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        AdvisorError::UnsupportedContentType("x".to_string()).status_code(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    assert_eq!(
        AdvisorError::ImageTooLarge { size: 2, max: 1 }.status_code(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        AdvisorError::UploadTooLarge { max: 1 }.status_code(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    assert_eq!(
        AdvisorError::InferenceUnavailable("x".to_string()).status_code(),
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        AdvisorError::InferenceRejected("x".to_string()).status_code(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        AdvisorError::Config("x".to_string()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_envelope() {
    let response = AdvisorError::NoFileProvided.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["type"], "error");
    assert_eq!(json["error"]["type"], "no_file_provided");
    assert_eq!(json["error"]["retryable"], false);
    assert!(json["error"]["message"].as_str().unwrap().contains("No file provided"));
}
