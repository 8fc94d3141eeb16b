use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{Delivery, DeliveryError, EmailVariables};

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com";
const SEND_PATH: &str = "/api/v1.0/email/send";

#[derive(Debug, Deserialize, Clone)]
pub struct EmailJsConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            private_key: None,
        }
    }
}

fn default_endpoint() -> String {
    EMAILJS_ENDPOINT.to_owned()
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a EmailVariables,
}

/// EmailJS REST client. Credentials come from [`EmailJsConfig`] at construction.
#[derive(Clone)]
pub struct EmailJsDelivery {
    client: Client,
    url: String,
    config: EmailJsConfig,
}

impl EmailJsDelivery {
    pub fn new(config: &EmailJsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}{SEND_PATH}", config.endpoint.trim_end_matches('/')),
            config: config.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Delivery for EmailJsDelivery {
    async fn deliver(&self, variables: &EmailVariables) -> Result<(), DeliveryError> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            access_token: self.config.private_key.as_deref(),
            template_params: variables,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(provider = "emailjs", "Contact message delivered");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DeliveryError::Auth(body),
            StatusCode::TOO_MANY_REQUESTS => DeliveryError::Quota(body),
            _ => DeliveryError::Service {
                status: status.as_u16(),
                body,
            },
        })
    }
}
