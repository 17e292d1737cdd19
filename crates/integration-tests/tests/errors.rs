//! Error bodies from a live backend, parsed for display

mod harness;

use harness::client::api_client;
use harness::mock_api::MockApi;
use reqwest::{Method, StatusCode};
use secp_auth::CredentialStore;
use secp_client::{ErrorDisplay, RequestOptions};
use serde_json::json;

#[tokio::test]
async fn coded_error_is_localized() {
    let mock = MockApi::start().await.unwrap();
    let client = api_client(&mock, CredentialStore::in_memory());

    let options = RequestOptions::new(Method::POST)
        .json(&json!({ "phone": "13800138000" }))
        .unwrap();
    let response = client.execute("/api/sms", &options).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let parsed = client.read_error(response).await.unwrap();

    assert_eq!(parsed.message, "今日验证码发送次数已达上限，请明天再试。");
    assert_eq!(parsed.debug, r#"{"code":"SMS_DAILY_LIMIT"}"#);
}

#[tokio::test]
async fn plain_text_error_is_shown_verbatim() {
    let mock = MockApi::start().await.unwrap();
    let client = api_client(&mock, CredentialStore::in_memory());

    let response = client.get("/api/broken").await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let parsed = client.read_error(response).await.unwrap();
    assert_eq!(parsed.message, "upstream exploded");
    assert_eq!(parsed.debug, "upstream exploded");

    let dictionary = client.messages().current();
    assert_eq!(
        parsed.display(&dictionary),
        Some(ErrorDisplay {
            message: "upstream exploded".to_owned(),
            debug: Some("upstream exploded".to_owned()),
        })
    );
}

#[tokio::test]
async fn read_error_loads_dictionary_once() {
    let mock = MockApi::start().await.unwrap();
    let client = api_client(&mock, CredentialStore::in_memory());
    assert!(!client.messages().is_loaded());

    for _ in 0..3 {
        let response = client.get("/api/broken").await.unwrap();
        client.read_error(response).await.unwrap();
    }

    assert!(client.messages().is_loaded());
    assert_eq!(mock.dictionary_count(), 1);
}

#[tokio::test]
async fn coded_error_without_dictionary_shows_key() {
    let mock = MockApi::builder().start().await.unwrap();
    let client = api_client(&mock, CredentialStore::in_memory());

    let response = client.get("/api/broken").await.unwrap();
    let _ = client.read_error(response).await.unwrap();

    let dictionary = client.messages().current();
    let parsed = secp_client::parse_error_body(&dictionary, r#"{"code":"SERVER_ERROR"}"#);
    assert_eq!(parsed.message, "error.server");

    let empty = ErrorDisplay::new("", "  ", &dictionary);
    assert_eq!(empty, None);
    let fallback = ErrorDisplay::new("", "trace", &dictionary).unwrap();
    assert_eq!(fallback.message, "common.requestFailed");
}
