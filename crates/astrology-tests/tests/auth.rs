//! API key gate tests.

use astrology_client::Error;
use astrology_tests::{create_test_client, create_unauthenticated_client, melbourne_birth};

#[tokio::test]
async fn test_missing_api_key_is_unauthorized() {
    let client = create_unauthenticated_client()
        .await
        .expect("Failed to create client");

    let result = client.birth_chart(&melbourne_birth()).await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Missing API key");
        }
        other => panic!("Expected 401, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_wrong_api_key_is_forbidden() {
    let client = create_unauthenticated_client()
        .await
        .expect("Failed to create client")
        .with_api_key("not-the-key");

    let result = client.birth_chart(&melbourne_birth()).await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("Expected 403, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_api_key_is_case_sensitive() {
    let client = create_unauthenticated_client()
        .await
        .expect("Failed to create client")
        .with_api_key(astrology_tests::api_key().to_uppercase());

    let result = client.birth_chart(&melbourne_birth()).await;

    assert_eq!(result.err().and_then(|e| e.status()), Some(403));
}

#[tokio::test]
async fn test_valid_api_key_passes() {
    let client = create_test_client().await.expect("Failed to create client");

    let chart = client
        .birth_chart(&melbourne_birth())
        .await
        .expect("Birth chart failed");

    assert!(!chart.objects.is_empty());
}

#[tokio::test]
async fn test_transits_require_api_key() {
    let client = create_unauthenticated_client()
        .await
        .expect("Failed to create client");

    let request = astrology_client::TransitRequest::for_birth(&melbourne_birth(), "2024-01-01");
    let result = client.transits(&request).await;

    assert_eq!(result.err().and_then(|e| e.status()), Some(401));
}
