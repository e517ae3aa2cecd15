//! Remote agent registry built by a best-effort discovery pass.

use crate::a2a::{A2aClient, A2aTransport, AgentCard, TransportError};
use crate::config::AgentDirectory;
use agri_telemetry::{Instrument, discovery_span, resolve_span};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A resolved agent: its card plus an open client handle.
#[derive(Clone)]
pub struct RegistryEntry {
    name: String,
    client: A2aClient,
}

impl RegistryEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn card(&self) -> &AgentCard {
        self.client.agent_card()
    }

    pub fn client(&self) -> &A2aClient {
        &self.client
    }

    /// Base URL the agent was discovered at.
    pub fn base_url(&self) -> &str {
        self.client.endpoint()
    }
}

/// Summary of a registered agent, as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub url: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("discovery deadline of {0:?} elapsed")]
    DeadlineExceeded(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryFailure {
    pub name: String,
    pub url: String,
    pub error: DiscoveryError,
}

/// Outcome of one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub registered: Vec<String>,
    pub failures: Vec<DiscoveryFailure>,
}

impl DiscoveryReport {
    /// True when at least one agent registered.
    pub fn is_success(&self) -> bool {
        !self.registered.is_empty()
    }

    pub fn configured(&self) -> usize {
        self.registered.len() + self.failures.len()
    }
}

/// Logical agent name → (card, client). Immutable once built; rebuild by
/// running discovery again.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    entries: Vec<RegistryEntry>,
}

impl AgentRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve every agent in `directory` concurrently.
    ///
    /// Each resolution is bounded by the transport's request timeout and all
    /// of them share the `discovery_timeout` deadline. Failures are logged
    /// and skipped; the registry holds exactly the agents that resolved, in
    /// directory order.
    pub async fn discover(
        directory: &AgentDirectory,
        transport: Arc<dyn A2aTransport>,
        discovery_timeout: Duration,
    ) -> (Self, DiscoveryReport) {
        let span = discovery_span(directory.len());
        async move {
            let deadline = tokio::time::Instant::now() + discovery_timeout;

            let attempts = directory.entries().iter().map(|endpoint| {
                let transport = transport.clone();
                async move {
                    info!(agent = %endpoint.name, url = %endpoint.url, "Discovering agent");
                    let resolved =
                        tokio::time::timeout_at(deadline, A2aClient::from_url(transport, &endpoint.url))
                            .await;
                    let outcome = match resolved {
                        Ok(Ok(client)) => Ok(client),
                        Ok(Err(e)) => Err(DiscoveryError::Transport(e)),
                        Err(_) => Err(DiscoveryError::DeadlineExceeded(discovery_timeout)),
                    };
                    (endpoint, outcome)
                }
                .instrument(resolve_span(&endpoint.name, &endpoint.url))
            });

            let mut registry = AgentRegistry::empty();
            let mut report = DiscoveryReport::default();

            for (endpoint, outcome) in join_all(attempts).await {
                match outcome {
                    Ok(client) => {
                        info!(
                            agent = %endpoint.name,
                            card.name = %client.agent_card().name,
                            skills = client.agent_card().skills.len(),
                            "Connected to agent"
                        );
                        report.registered.push(endpoint.name.clone());
                        registry.insert(endpoint.name.clone(), client);
                    }
                    Err(error) => {
                        warn!(agent = %endpoint.name, url = %endpoint.url, %error, "Failed to connect to agent");
                        report.failures.push(DiscoveryFailure {
                            name: endpoint.name.clone(),
                            url: endpoint.url.clone(),
                            error,
                        });
                    }
                }
            }

            info!(
                connected = report.registered.len(),
                configured = report.configured(),
                "Agent discovery finished"
            );
            (registry, report)
        }
        .instrument(span)
        .await
    }

    /// Register an already-built client. Used when assembling a registry by
    /// hand; an existing entry with the same name is replaced.
    pub fn insert(&mut self, name: impl Into<String>, client: A2aClient) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.client = client,
            None => self.entries.push(RegistryEntry { name, client }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Names of registered agents, in discovery order.
    pub fn list_available_agents(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    pub fn agent_card(&self, name: &str) -> Option<&AgentCard> {
        self.get(name).map(RegistryEntry::card)
    }

    pub fn get_agent_info(&self, name: &str) -> Option<AgentInfo> {
        self.get(name).map(|entry| {
            let card = entry.card();
            AgentInfo {
                name: card.name.clone(),
                description: card.description.clone(),
                url: entry.base_url().to_string(),
                skills: card.skills.iter().map(|s| s.name.clone()).collect(),
            }
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry").field("agents", &self.list_available_agents()).finish()
    }
}
