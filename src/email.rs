//! Confirmation email delivery.
//!
//! The scheduling service only knows the `Notifier` trait; which mailer
//! backs it is decided at startup from configuration.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use thiserror::Error;
use tracing::info;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Everything the confirmation email needs, already rendered to strings.
#[derive(Debug, Clone)]
pub struct AppointmentConfirmation {
    pub client_name: String,
    pub client_email: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub stylist_name: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Email request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email provider rejected the message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_appointment_confirmation(
        &self,
        confirmation: &AppointmentConfirmation,
    ) -> Result<(), MailerError>;
}

/// Sends through the SendGrid v3 mail API.
pub struct SendGridMailer {
    http: reqwest::Client,
    api_key: SecretString,
    from_address: String,
}

impl SendGridMailer {
    pub fn new(api_key: SecretString, from_address: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            from_address,
        }
    }
}

#[async_trait]
impl Notifier for SendGridMailer {
    async fn send_appointment_confirmation(
        &self,
        confirmation: &AppointmentConfirmation,
    ) -> Result<(), MailerError> {
        let body = format!(
            "Dear {},\n\n\
             Your appointment has been confirmed!\n\n\
             Details:\n\
             Date: {}\n\
             Time: {} - {}\n\
             Stylist: {}\n\n\
             Thank you for choosing our service!",
            confirmation.client_name,
            confirmation.date,
            confirmation.start_time,
            confirmation.end_time,
            confirmation.stylist_name,
        );

        let payload = json!({
            "personalizations": [{ "to": [{ "email": confirmation.client_email }] }],
            "from": { "email": self.from_address },
            "subject": "Appointment Confirmation",
            "content": [{ "type": "text/plain", "value": body }],
        });

        let response = self
            .http
            .post(SENDGRID_SEND_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected(format!("{status}: {detail}")));
        }

        info!(client = %confirmation.client_email, "Confirmation email sent");
        Ok(())
    }
}

/// Stand-in when no email provider is configured: the confirmation is
/// recorded in the log instead of delivered.
pub struct LoggingMailer;

#[async_trait]
impl Notifier for LoggingMailer {
    async fn send_appointment_confirmation(
        &self,
        confirmation: &AppointmentConfirmation,
    ) -> Result<(), MailerError> {
        info!(
            client = %confirmation.client_email,
            date = %confirmation.date,
            start = %confirmation.start_time,
            end = %confirmation.end_time,
            stylist = %confirmation.stylist_name,
            "Email delivery not configured; confirmation logged only"
        );
        Ok(())
    }
}
