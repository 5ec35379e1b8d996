//! Email delivery of freshly issued license keys.
//!
//! Two modes: send via the Resend API when an API key is configured, or
//! log and skip. Delivery always runs after the license record is
//! durable; a failed send is reported to the caller but never rolls the
//! record back.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Result of attempting to send a license key email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailSendResult {
    /// Email was sent successfully via Resend
    Sent,
    /// No API key configured; delivery skipped, log only
    Disabled,
}

/// Resend API request body.
#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    text: String,
}

/// Resend API response.
#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    #[allow(dead_code)]
    id: String,
}

/// Email service using the Resend API.
#[derive(Clone)]
pub struct EmailService {
    api_key: Option<String>,
    from_email: String,
    /// Product name shown in the subject and body.
    product_name: String,
    http_client: Client,
}

impl EmailService {
    pub fn new(api_key: Option<String>, from_email: String, product_name: String) -> Self {
        Self {
            api_key,
            from_email,
            product_name,
            http_client: Client::new(),
        }
    }

    /// Send the license key to its owner.
    pub async fn send_license_key(&self, to_email: &str, key: &str) -> Result<EmailSendResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(to = %to_email, "no Resend API key configured, skipping license email");
            return Ok(EmailSendResult::Disabled);
        };

        let subject = format!("Your {} license key", self.product_name);
        let text = format!(
            "Thanks for purchasing {}!\n\nYour license key:\n\n{}\n\nEnter this key in {} to unlock the app. Keep it somewhere safe; you will need it again on a new device.\n\nIf you didn't purchase this, you can ignore this email.",
            self.product_name, key, self.product_name
        );

        let request = ResendEmailRequest {
            from: &self.from_email,
            to: vec![to_email],
            subject,
            text,
        };

        let response = self
            .http_client
            .post(RESEND_API_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send request to Resend API");
                AppError::Storage(format!("email service error: {}", e))
            })?;

        if response.status().is_success() {
            let _result: ResendEmailResponse = response.json().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to parse Resend API response");
                AppError::Storage("email service response error".into())
            })?;

            tracing::info!(to = %to_email, "license key email sent via Resend");
            Ok(EmailSendResult::Sent)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Resend API returned error");
            Err(AppError::Storage(format!(
                "email service error: {} - {}",
                status, body
            )))
        }
    }
}
