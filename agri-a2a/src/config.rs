use crate::a2a::DEFAULT_REQUEST_TIMEOUT;
use serde::Deserialize;
use std::time::Duration;

/// Logical name and base URL of one remote agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentEndpoint {
    pub name: String,
    pub url: String,
}

impl AgentEndpoint {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

/// Ordered set of agents to discover. Names are unique; adding an existing
/// name replaces its URL in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentDirectory {
    entries: Vec<AgentEndpoint>,
}

impl AgentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.insert(AgentEndpoint::new(name, url));
        self
    }

    pub fn insert(&mut self, endpoint: AgentEndpoint) {
        match self.entries.iter_mut().find(|e| e.name == endpoint.name) {
            Some(existing) => existing.url = endpoint.url,
            None => self.entries.push(endpoint),
        }
    }

    /// Add `name` with the URL from `var`, or `default_url` when unset/empty.
    pub fn with_env_agent(self, name: &str, var: &str, default_url: &str) -> Self {
        let url = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        self.with_agent(name, url.as_deref().unwrap_or(default_url))
    }

    pub fn entries(&self) -> &[AgentEndpoint] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<AgentEndpoint> for AgentDirectory {
    fn from_iter<I: IntoIterator<Item = AgentEndpoint>>(iter: I) -> Self {
        let mut directory = AgentDirectory::new();
        for endpoint in iter {
            directory.insert(endpoint);
        }
        directory
    }
}

/// Timeouts for the outbound side (card resolution and dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request HTTP timeout (default: 30 seconds)
    pub request_timeout: Duration,
    /// Deadline for a whole discovery pass (default: 60 seconds)
    pub discovery_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { request_timeout: DEFAULT_REQUEST_TIMEOUT, discovery_timeout: Duration::from_secs(60) }
    }
}

impl ClientConfig {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }
}

/// Security configuration for the A2A server.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Allowed origins for CORS (empty = allow all)
    pub allowed_origins: Vec<String>,
    /// Maximum request body size in bytes (default: 10MB)
    pub max_body_size: usize,
    /// Request timeout duration (default: 120 seconds, long enough for a
    /// fan-out to several 30 second agents)
    pub request_timeout: Duration,
    /// Whether to include detailed error messages in responses (default: false)
    pub expose_error_details: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_body_size: 10 * 1024 * 1024,
            request_timeout: Duration::from_secs(120),
            expose_error_details: false,
        }
    }
}

impl SecurityConfig {
    /// Permissive CORS and detailed errors.
    pub fn development() -> Self {
        Self { expose_error_details: true, ..Self::default() }
    }
}

/// Configuration for the A2A server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// URL advertised in the served agent card; derived from host and port
    /// when unset.
    pub public_url: Option<String>,
    pub security: SecurityConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "localhost".to_string(), port: 10007, public_url: None, security: SecurityConfig::default() }
    }
}

impl ServerConfig {
    /// Defaults overridden by `HOST` and `PORT`.
    pub fn from_env() -> Result<Self, agri_core::AgriError> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| agri_core::AgriError::Config(format!("PORT is not a valid port: {port}")))?;
        }
        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = Some(url.into());
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = security;
        self
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.security.expose_error_details = expose;
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        self.public_url.clone().unwrap_or_else(|| format!("http://{}:{}/", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_preserves_order_and_replaces() {
        let directory = AgentDirectory::new()
            .with_agent("market", "http://localhost:10006")
            .with_agent("weather", "http://localhost:10005")
            .with_agent("market", "http://market.internal:80");

        let names: Vec<_> = directory.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["market", "weather"]);
        assert_eq!(directory.entries()[0].url, "http://market.internal:80");
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_env_agent_falls_back_to_default() {
        let directory = AgentDirectory::new().with_env_agent(
            "schemes",
            "AGRI_TEST_UNSET_SCHEMES_URL",
            "http://localhost:10004",
        );
        assert_eq!(directory.entries()[0].url, "http://localhost:10004");
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.discovery_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_server_config_urls() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "localhost:10007");
        assert_eq!(config.base_url(), "http://localhost:10007/");

        let config = config.with_public_url("https://agri.example.org/");
        assert_eq!(config.base_url(), "https://agri.example.org/");
        assert!(SecurityConfig::development().expose_error_details);
    }
}
