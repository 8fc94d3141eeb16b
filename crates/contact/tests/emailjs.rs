use std::sync::{Arc, Mutex};

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use folio_contact::{Delivery, DeliveryError, EmailJsConfig, EmailJsDelivery, EmailVariables};

type Captured = Arc<Mutex<Vec<serde_json::Value>>>;

async fn start(status: StatusCode) -> anyhow::Result<(String, Captured)> {
    let captured: Captured = Arc::default();

    let app = Router::new()
        .route(
            "/api/v1.0/email/send",
            post(
                move |State(captured): State<Captured>, Json(body): Json<serde_json::Value>| async move {
                    captured.lock().unwrap().push(body);
                    (status, "response body")
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok((format!("http://{addr}"), captured))
}

fn delivery(endpoint: String) -> anyhow::Result<EmailJsDelivery> {
    EmailJsDelivery::new(&EmailJsConfig {
        endpoint,
        service_id: "service_folio".to_owned(),
        template_id: "template_contact".to_owned(),
        public_key: "public_key".to_owned(),
        private_key: Some("private_key".to_owned()),
    })
}

fn variables() -> EmailVariables {
    EmailVariables {
        user_name: "Ada Lovelace".to_owned(),
        user_email: "ada@example.com".to_owned(),
        message: "Hello".to_owned(),
    }
}

#[tokio::test]
async fn test_deliver_posts_template_params() -> anyhow::Result<()> {
    let (endpoint, captured) = start(StatusCode::OK).await?;

    delivery(endpoint)?.deliver(&variables()).await?;

    let requests = captured.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(body["service_id"], "service_folio");
    assert_eq!(body["template_id"], "template_contact");
    assert_eq!(body["user_id"], "public_key");
    assert_eq!(body["accessToken"], "private_key");
    assert_eq!(body["template_params"]["user_name"], "Ada Lovelace");
    assert_eq!(body["template_params"]["user_email"], "ada@example.com");
    assert_eq!(body["template_params"]["message"], "Hello");

    Ok(())
}

#[tokio::test]
async fn test_error_statuses_are_classified() -> anyhow::Result<()> {
    let (endpoint, _) = start(StatusCode::FORBIDDEN).await?;
    let err = delivery(endpoint)?.deliver(&variables()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Auth(body) if body == "response body"));

    let (endpoint, _) = start(StatusCode::TOO_MANY_REQUESTS).await?;
    let err = delivery(endpoint)?.deliver(&variables()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Quota(_)));

    let (endpoint, _) = start(StatusCode::BAD_GATEWAY).await?;
    let err = delivery(endpoint)?.deliver(&variables()).await.unwrap_err();
    assert!(matches!(err, DeliveryError::Service { status: 502, .. }));

    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() -> anyhow::Result<()> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);

    let err = delivery(format!("http://{addr}"))?
        .deliver(&variables())
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Network(_)));

    Ok(())
}
