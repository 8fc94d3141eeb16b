use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

use crate::{Delivery, DeliveryError, EmailVariables};

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    #[serde(default)]
    pub contact_address: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: default_from_address(),
            contact_address: String::new(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "folio <noreply@folio.localhost>".to_owned()
}

/// Sends the contact message to the site owner over SMTP.
#[derive(Clone)]
pub struct SmtpDelivery {
    mailer: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpDelivery {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mailer = if config.username.is_empty() || config.password.is_empty() {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.host)
                .port(config.port)
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.host,
                smtp_port = config.port,
                "SMTP delivery initialized with authentication and TLS"
            );

            let creds = Credentials::new(config.username.clone(), config.password.clone());

            SmtpTransport::relay(&config.host)?
                .port(config.port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from_address.parse()?,
            to: config.contact_address.parse()?,
        })
    }

    fn message(&self, variables: &EmailVariables) -> Result<Message, DeliveryError> {
        let reply_to: Mailbox = variables
            .user_email
            .parse()
            .map_err(|e: lettre::address::AddressError| DeliveryError::Message(e.to_string()))?;

        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .reply_to(reply_to)
            .subject(format!("New message from {}", variables.user_name))
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Name: {}\nEmail: {}\n\n{}\n",
                variables.user_name, variables.user_email, variables.message
            ))
            .map_err(|e| DeliveryError::Message(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Delivery for SmtpDelivery {
    async fn deliver(&self, variables: &EmailVariables) -> Result<(), DeliveryError> {
        let message = self.message(variables)?;
        let mailer = self.mailer.clone();

        let sent = tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;

        match sent {
            Ok(_) => {
                tracing::info!(provider = "smtp", "Contact message delivered");
                Ok(())
            }
            Err(err) => Err(match err.status() {
                Some(code) => DeliveryError::Service {
                    status: code.to_string().parse().unwrap_or_default(),
                    body: err.to_string(),
                },
                None => DeliveryError::Network(err.to_string()),
            }),
        }
    }
}
