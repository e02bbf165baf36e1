//! Email delivery — pluggable, trait-based.
//!
//! Default: `WebhookEmailSender`, which posts each message to a configured
//! delivery endpoint. Without an endpoint, `DisabledEmailSender` reports every
//! message as undelivered so it is still logged (as `failed`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::errors::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingEmail {
    pub to: String,
    pub candidate_name: String,
    pub subject: String,
    pub body: String,
}

/// What the delivery endpoint reports back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeliveryReport {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// `Err` means the sender could not be reached at all; an undelivered
    /// message comes back as `Ok` with `success: false`.
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReport, AppError>;

    /// Short label for logs, e.g. "webhook".
    fn backend(&self) -> &'static str;
}

pub struct WebhookEmailSender {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl WebhookEmailSender {
    pub fn new(endpoint: String, token: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint,
            token,
        })
    }
}

#[async_trait]
impl EmailSender for WebhookEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReport, AppError> {
        let mut request = self.client.post(&self.endpoint).json(email);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Email(format!("Email endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Email(format!(
                "Email endpoint returned {status}: {body}"
            )));
        }

        response
            .json::<DeliveryReport>()
            .await
            .map_err(|e| AppError::Email(format!("Unreadable email endpoint response: {e}")))
    }

    fn backend(&self) -> &'static str {
        "webhook"
    }
}

pub struct DisabledEmailSender;

#[async_trait]
impl EmailSender for DisabledEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<DeliveryReport, AppError> {
        warn!("EMAIL_WEBHOOK_URL is not set; not sending \"{}\"", email.subject);
        Ok(DeliveryReport {
            success: false,
            message: Some("email delivery is not configured".to_string()),
        })
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}

/// Picks the sender for the configured environment.
pub fn build_email_sender(config: &Config) -> anyhow::Result<Arc<dyn EmailSender>> {
    Ok(match &config.email_webhook_url {
        Some(endpoint) => Arc::new(WebhookEmailSender::new(
            endpoint.clone(),
            config.email_webhook_token.clone(),
        )?),
        None => Arc::new(DisabledEmailSender),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "lena@example.com".to_string(),
            candidate_name: "Lena Fischer".to_string(),
            subject: "Interview invitation".to_string(),
            body: "Are you free on Tuesday?".to_string(),
        }
    }

    #[test]
    fn test_outgoing_email_payload_shape() {
        let payload = serde_json::to_value(email()).unwrap();
        assert_eq!(payload["to"], "lena@example.com");
        assert_eq!(payload["candidateName"], "Lena Fischer");
        assert_eq!(payload["subject"], "Interview invitation");
    }

    #[test]
    fn test_delivery_report_defaults_to_failure() {
        let report: DeliveryReport = serde_json::from_str("{}").unwrap();
        assert!(!report.success);
        let report: DeliveryReport = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(report.success);
    }

    #[tokio::test]
    async fn test_disabled_sender_reports_undelivered() {
        let report = DisabledEmailSender.send(&email()).await.unwrap();
        assert!(!report.success);
        assert_eq!(DisabledEmailSender.backend(), "disabled");
    }
}
