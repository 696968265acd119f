//! HTTP client for the mall tenant directory endpoint.

use std::time::Duration;

use reqwest::Client;

use crate::error::DirectoryError;
use crate::store::StoreRecord;

/// HTTP client for the tenant directory endpoint.
///
/// One unauthenticated GET with no query parameters returns the entire
/// tenant list as a JSON array.
pub struct DirectoryClient {
    client: Client,
    url: String,
}

impl DirectoryClient {
    /// Creates a client with the configured request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }

    /// Fetches the full tenant list.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::Http`] — network, TLS, or timeout failure.
    /// - [`DirectoryError::UnexpectedStatus`] — any non-2xx status.
    /// - [`DirectoryError::Deserialize`] — body is not a JSON array of
    ///   tenant records.
    pub async fn fetch_directory(&self) -> Result<Vec<StoreRecord>, DirectoryError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DirectoryError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        let stores =
            serde_json::from_str::<Vec<StoreRecord>>(&body).map_err(|e| {
                DirectoryError::Deserialize {
                    context: format!("tenant directory from {}", self.url),
                    source: e,
                }
            })?;
        Ok(stores)
    }

    /// Endpoint this client fetches from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}
