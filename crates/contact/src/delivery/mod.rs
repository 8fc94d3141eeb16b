use std::{sync::Arc, time::Duration};

use serde::Deserialize;
use strum::{AsRefStr, Display};

use crate::EmailVariables;

mod emailjs;
mod smtp;

pub use emailjs::*;
pub use smtp::*;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authorization rejected: {0}")]
    Auth(String),

    #[error("quota exceeded: {0}")]
    Quota(String),

    #[error("service error ({status}): {body}")]
    Service { status: u16, body: String },

    #[error("invalid message: {0}")]
    Message(String),

    #[error("no response after {0:?}")]
    Timeout(Duration),
}

/// Transactional email capability that transmits a contact message.
#[async_trait::async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, variables: &EmailVariables) -> Result<(), DeliveryError>;
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    #[default]
    EmailJs,
    Smtp,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EmailConfig {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default)]
    pub emailjs: EmailJsConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl EmailConfig {
    pub fn validate(&self) -> Result<(), String> {
        match self.provider {
            Provider::EmailJs => {
                let emailjs = &self.emailjs;
                for (key, value) in [
                    ("service_id", &emailjs.service_id),
                    ("template_id", &emailjs.template_id),
                    ("public_key", &emailjs.public_key),
                ] {
                    if value.trim().is_empty() {
                        return Err(format!("email.emailjs.{key} must be set"));
                    }
                }
            }
            Provider::Smtp => {
                let smtp = &self.smtp;
                if smtp.host.trim().is_empty() {
                    return Err("email.smtp.host must be set".to_owned());
                }
                if smtp.contact_address.trim().is_empty() {
                    return Err("email.smtp.contact_address must be set".to_owned());
                }
            }
        }

        Ok(())
    }
}

/// Build the collaborator selected by `config.provider`.
pub fn build_delivery(config: &EmailConfig) -> anyhow::Result<Arc<dyn Delivery>> {
    tracing::info!(provider = %config.provider, "Creating email delivery");

    let delivery: Arc<dyn Delivery> = match config.provider {
        Provider::EmailJs => Arc::new(EmailJsDelivery::new(&config.emailjs)?),
        Provider::Smtp => Arc::new(SmtpDelivery::new(&config.smtp)?),
    };

    Ok(delivery)
}
