use std::time::Duration;

use crate::domain::repository::Mailer;
use crate::error::ApiError;

/// Mail transport timeout. The send is awaited inside the registration
/// request, so a hung provider must not hold the handler open.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Transactional-email HTTP client.
///
/// Without a configured endpoint (local development) the code is logged
/// instead of sent, and the send always succeeds.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: Option<String>,
    api_key: String,
    sender: String,
}

impl HttpMailer {
    pub fn new(endpoint: Option<String>, api_key: String, sender: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .expect("failed to build mail client");
        Self {
            client,
            endpoint,
            api_key,
            sender,
        }
    }
}

impl Mailer for HttpMailer {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), ApiError> {
        let Some(endpoint) = &self.endpoint else {
            tracing::info!(to, code, "mail endpoint not configured; logging code instead");
            return Ok(());
        };

        let body = serde_json::json!({
            "from": self.sender,
            "to": to,
            "subject": "Your verification code",
            "text": format!(
                "Your verification code is {code}. It expires in 10 minutes."
            ),
        });

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, to, "mail send failed");
                ApiError::MailDelivery
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), to, "mail provider rejected message");
            return Err(ApiError::MailDelivery);
        }
        Ok(())
    }
}
