use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure of one HTTP exchange with a remote agent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// JSON-over-HTTP exchange used for card resolution and message dispatch.
///
/// [`HttpTransport`] is the production implementation; tests substitute
/// in-memory transports.
#[async_trait]
pub trait A2aTransport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError>;
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError>;
}

/// reqwest-backed transport with a fixed per-request timeout.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }

    async fn read_json(&self, url: &str, response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), url: url.to_string() });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl A2aTransport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self.client.get(url).send().await.map_err(|e| self.classify(e))?;
        self.read_json(url, response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        let response =
            self.client.post(url).json(body).send().await.map_err(|e| self.classify(e))?;
        self.read_json(url, response).await
    }
}
