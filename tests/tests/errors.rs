use dg_bitgo_clients::api::wallet::WalletAPI;
use dg_bitgo_clients::rpc::wallet::WalletClient;
use dg_bitgo_core::config::WalletClientConfig;
use dg_bitgo_core::send_many::SendManyRequest;
use dg_bitgo_tests::{init_logger, test_client, test_config, TEST_TOKEN};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::json;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
pub async fn test_missing_access_token() {
    init_logger();
    let server = MockServer::start().await;
    let config = WalletClientConfig {
        base_url: format!("{}/api/v1", server.uri()),
        ..Default::default()
    };
    let client = WalletClient::new(config).unwrap();
    let err = client.list_wallets().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    let err = client.get_wallet("w1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    let mut recipients = BTreeMap::new();
    recipients.insert("addr1".to_string(), Decimal::ONE);
    let request = SendManyRequest::new("w1", SecretString::new("pw".into()), recipients);
    let err = client.send_many(&request).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
pub async fn test_set_access_token() {
    init_logger();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/wallet"))
        .and(header("Authorization", "Bearer rotated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wallets": []})))
        .expect(1)
        .mount(&server)
        .await;
    let config = WalletClientConfig {
        base_url: format!("{}/api/v1", server.uri()),
        ..Default::default()
    };
    let mut client = WalletClient::new(config).unwrap();
    client.set_access_token(SecretString::new("rotated".into()));
    assert!(client.list_wallets().await.unwrap().is_empty());
}

#[tokio::test]
pub async fn test_login_unsupported() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let err = client
        .login("ops@example.com", "password", "000000", true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
pub async fn test_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/wallet"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"wallets\": [}"))
        .mount(&server)
        .await;
    let client = test_client(&server);
    let err = client.list_wallets().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[tokio::test]
pub async fn test_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/wallet/w1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "w1",
            "balance": "a lot",
            "confirmedBalance": 1
        })))
        .mount(&server)
        .await;
    let client = test_client(&server);
    let err = client.get_wallet("w1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
}

#[tokio::test]
pub async fn test_bad_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/wallet"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;
    let client = test_client(&server);
    let err = client.list_wallets().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Other);
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
pub async fn test_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/wallet"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"wallets": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    init_logger();
    let client = WalletClient::new(test_config(&server).with_timeout(1)).unwrap();
    let err = client.list_wallets().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TimedOut);
}

#[tokio::test]
pub async fn test_connection_refused() {
    init_logger();
    let config = WalletClientConfig::new(
        "http://127.0.0.1:1/api/v1",
        SecretString::new(TEST_TOKEN.into()),
    );
    let client = WalletClient::new(config).unwrap();
    let err = client.list_wallets().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotConnected);
}

#[tokio::test]
pub async fn test_insecure_client_builds() {
    init_logger();
    let config = WalletClientConfig::new(
        "https://localhost:3080/api/v1",
        SecretString::new(TEST_TOKEN.into()),
    )
    .with_insecure_skip_verify(true);
    let client = WalletClient::new(config).unwrap();
    assert!(client.config().insecure_skip_verify);
}
