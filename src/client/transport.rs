use crate::config::ClientSettings;
use crate::models::{AttributeKey, NeighborhoodRecord, ScoredNeighborhood};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the scoring API
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Short text suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::RequestError(e) if e.is_timeout() => {
                "The request timed out. Please try again.".to_string()
            }
            ClientError::RequestError(_) => {
                "Could not reach the neighborhood service.".to_string()
            }
            ClientError::Status { message, .. } => format!("Error fetching results: {}", message),
            ClientError::InvalidResponse(_) => {
                "The neighborhood service sent an unreadable response.".to_string()
            }
        }
    }
}

/// Request/response boundary between a search session and the scoring service
#[async_trait]
pub trait ScoringTransport: Send + Sync {
    async fn rank(&self, preferences: &[AttributeKey]) -> Result<Vec<ScoredNeighborhood>, ClientError>;
}

#[derive(Debug, Serialize)]
struct RankPayload<'a> {
    preferences: &'a [AttributeKey],
}

/// Failure bodies carry `error`, `message`, or both
#[derive(Debug, Deserialize)]
struct FailureBody {
    error: Option<String>,
    message: Option<String>,
}

/// reqwest-backed client for the neighborhood API
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    base_url: String,
    client: Client,
}

impl HttpScoringClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(settings.base_url.clone(), Duration::from_secs(settings.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the full unscored record collection
    pub async fn list(&self) -> Result<Vec<NeighborhoodRecord>, ClientError> {
        let response = self.client.get(self.url("/api/match")).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl ScoringTransport for HttpScoringClient {
    async fn rank(&self, preferences: &[AttributeKey]) -> Result<Vec<ScoredNeighborhood>, ClientError> {
        tracing::debug!("Requesting ranking for {:?} from {}", preferences, self.base_url);

        let response = self
            .client
            .post(self.url("/api/match"))
            .json(&RankPayload { preferences })
            .send()
            .await?;

        decode(response).await
    }
}

/// Turn a response into `T`, or into a `Status` error carrying the server's text
async fn decode<T>(response: Response) -> Result<T, ClientError>
where
    T: for<'de> Deserialize<'de>,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<FailureBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });

        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
