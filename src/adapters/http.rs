use crate::domain::model::{NotifyResponse, Target};
use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Sends `GET {prefix}/{target}` for each press. Any HTTP status counts as
/// a response; only transport failures are errors.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    url_prefix: String,
}

impl HttpNotifier {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url_prefix)
    }

    pub fn with_client(client: Client, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into().trim_end_matches('/').to_string();
        Self { client, url_prefix }
    }

    pub fn endpoint(&self, target: Target) -> String {
        format!("{}/{}", self.url_prefix, target)
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, target: Target) -> Result<NotifyResponse> {
        let url = self.endpoint(target);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        Ok(NotifyResponse { status, body })
    }
}
