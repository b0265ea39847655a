//! End-to-end tests: client → gateway → echo upstream.

use serde_json::Value;
use sha2::{Digest, Sha256};

use signing_gateway::config::{GatewayConfig, SignerConfig};

mod common;

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[tokio::test]
async fn forwards_request_with_signature() {
    let upstream = common::start_echo_upstream().await;
    let (gateway, shutdown) = common::start_gateway(GatewayConfig::default(), upstream).await;

    let echoed: Value = common::client()
        .get(format!("http://{gateway}/orders?a=1"))
        .header("X-Date", "2024-01-01")
        .header("Accept", "application/json")
        .send()
        .await
        .expect("Gateway unreachable")
        .json()
        .await
        .unwrap();

    assert_eq!(echoed["path"], "/orders");
    assert_eq!(echoed["query"], "a=1");
    assert_eq!(echoed["signature"], sha256_hex("a=12024-01-01test"));
    assert_eq!(echoed["headers"]["accept"], "application/json");
    assert_eq!(echoed["headers"]["x-date"], "2024-01-01");

    shutdown.trigger();
}

#[tokio::test]
async fn client_signature_is_replaced() {
    let upstream = common::start_echo_upstream().await;
    let config = GatewayConfig {
        signer: SignerConfig {
            secret_key: "gateway-secret".into(),
            headers: vec!["APP-ID".into(), "Authorization".into()],
            ..SignerConfig::default()
        },
        ..GatewayConfig::default()
    };
    let (gateway, shutdown) = common::start_gateway(config, upstream).await;

    let echoed: Value = common::client()
        .post(format!("http://{gateway}/v1/pay?amount=10&currency=EUR"))
        .header("X-Signature", "forged")
        .header("Authorization", "Bearer t0k3n")
        .header("APP-ID", "shop")
        .body("ignored by the signature")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(echoed["signature_count"], 1);
    assert_eq!(
        echoed["signature"],
        sha256_hex("amount=10&currency=EURshopBearer t0k3ngateway-secret")
    );

    shutdown.trigger();
}

#[tokio::test]
async fn empty_configuration_signs_empty_payload() {
    let upstream = common::start_echo_upstream().await;
    let config = GatewayConfig {
        signer: SignerConfig {
            secret_key: String::new(),
            headers: Vec::new(),
            ..SignerConfig::default()
        },
        ..GatewayConfig::default()
    };
    let (gateway, shutdown) = common::start_gateway(config, upstream).await;

    let echoed: Value = common::client()
        .get(format!("http://{gateway}/"))
        .header("Authorization", "not signed")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        echoed["signature"],
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn repeated_requests_get_identical_signatures() {
    let upstream = common::start_echo_upstream().await;
    let (gateway, shutdown) = common::start_gateway(GatewayConfig::default(), upstream).await;
    let client = common::client();

    let mut signatures = Vec::new();
    for _ in 0..3 {
        let echoed: Value = client
            .get(format!("http://{gateway}/r?x=1"))
            .header("APP-ID", "7")
            .header("X-Request-ID", uuid::Uuid::new_v4().to_string())
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        signatures.push(echoed["signature"].as_str().unwrap().to_string());
    }

    assert_eq!(signatures[0], sha256_hex("x=17test"));
    assert!(signatures.iter().all(|s| s == &signatures[0]));

    shutdown.trigger();
}

#[tokio::test]
async fn response_carries_request_id() {
    let upstream = common::start_echo_upstream().await;
    let (gateway, shutdown) = common::start_gateway(GatewayConfig::default(), upstream).await;

    let response = common::client()
        .get(format!("http://{gateway}/"))
        .header("X-Request-ID", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");

    let echoed: Value = response.json().await.unwrap();
    assert_eq!(echoed["headers"]["x-request-id"], "req-123");

    shutdown.trigger();
}
