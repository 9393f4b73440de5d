//! SMS gateway client against a mock HTTP server

use httpmock::prelude::*;
use pp_infra::sms::{HttpSmsGateway, SmsService};
use pp_infra::InfrastructureError;
use pp_shared::SmsConfig;

fn config(server: &MockServer) -> SmsConfig {
    SmsConfig {
        provider: "gateway".to_string(),
        gateway_url: server.url("/api/v1/sms/send"),
        api_token: "test-token".to_string(),
        sender_id: "PayProtect".to_string(),
        gateway_id: "2".to_string(),
        max_retries: 3,
        retry_delay_ms: 1,
        request_timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_sends_all_query_parameters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/sms/send")
            .query_param("api_token", "test-token")
            .query_param("sender_id", "PayProtect")
            .query_param("recipient", "2348012345678")
            .query_param("message", "Your code is 483920")
            .query_param("gateway_id", "2");
        then.status(200)
            .json_body(serde_json::json!({ "message_id": "gw-7781" }));
    });

    let gateway = HttpSmsGateway::new(config(&server)).unwrap();
    let reference = gateway
        .send_sms("2348012345678", "Your code is 483920")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(reference, "gw-7781");
}

#[tokio::test]
async fn test_retries_server_errors_until_exhausted() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/sms/send");
        then.status(502);
    });

    let gateway = HttpSmsGateway::new(config(&server)).unwrap();
    let result = gateway.send_sms("14155552671", "Your code is 000123").await;

    mock.assert_hits(3);
    match result {
        Err(InfrastructureError::Sms(msg)) => {
            assert!(msg.contains("after 3 attempts"));
            assert!(msg.contains("502"));
        }
        other => panic!("Expected Sms error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_does_not_retry_client_errors() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/sms/send");
        then.status(401).body("bad token");
    });

    let gateway = HttpSmsGateway::new(config(&server)).unwrap();
    let result = gateway.send_sms("14155552671", "Your code is 000123").await;

    mock.assert_hits(1);
    assert!(matches!(result, Err(InfrastructureError::Sms(_))));
}

#[tokio::test]
async fn test_plain_text_reference() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/sms/send");
        then.status(200).body("OK-99812");
    });

    let gateway = HttpSmsGateway::new(config(&server)).unwrap();
    let reference = gateway.send_sms("14155552671", "hello").await.unwrap();

    assert_eq!(reference, "OK-99812");
}

#[tokio::test]
async fn test_invalid_destination_never_hits_gateway() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/sms/send");
        then.status(200);
    });

    let gateway = HttpSmsGateway::new(config(&server)).unwrap();
    let result = gateway.send_sms("+14155552671", "hello").await;

    assert!(result.is_err());
    mock.assert_hits(0);
}
