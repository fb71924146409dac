//! HTTP mail relay adapter
//!
//! Posts messages as JSON to a configured mail relay endpoint. The relay is
//! expected to accept `{from, to, subject, body}` and answer 2xx on success.

use faultline_core::ports::IMailTransport;
use serde::Serialize;

#[derive(Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Mail transport that delivers via an HTTP relay endpoint.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait::async_trait]
impl IMailTransport for HttpMailer {
    async fn send(&self, from: &str, to: &str, subject: &str, body: &str)
        -> anyhow::Result<()> {
        let message = OutboundMessage {
            from,
            to,
            subject,
            body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&message)
            .send()
            .await?;
        response.error_for_status()?;

        tracing::debug!(to, subject, "notification mail sent");
        Ok(())
    }
}
