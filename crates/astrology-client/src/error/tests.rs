//! Unit tests for error module.

use super::*;

#[test]
fn test_api_error_display() {
    let error = Error::Api {
        status: 400,
        message: "Invalid date: 1991-13-40".to_string(),
    };

    let display = format!("{}", error);
    assert!(display.contains("400"));
    assert!(display.contains("Invalid date"));
}

#[test]
fn test_not_found_error_display() {
    let error = Error::NotFound("Resource not found".to_string());

    let display = format!("{}", error);
    assert!(display.contains("Not found"));
    assert!(display.contains("Resource not found"));
}

#[test]
fn test_invalid_url_error() {
    let error: Error = url::Url::parse("::").unwrap_err().into();

    assert!(format!("{}", error).contains("Invalid URL"));
    assert_eq!(error.status(), None);
}

#[test]
fn test_error_status() {
    let error = Error::Api {
        status: 403,
        message: "Invalid API key".to_string(),
    };
    assert_eq!(error.status(), Some(403));
    assert_eq!(Error::NotFound(String::new()).status(), Some(404));
}

#[test]
fn test_json_error() {
    let error: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();

    assert!(format!("{}", error).contains("JSON error"));
}
