use crate::config::OrchestratorConfig;
use crate::routing::{Intent, IntentClassifier, KeywordClassifier, RoutingTable};
use crate::tools::all_tools;
use agri_a2a::{AgentRegistry, DiscoveryReport, DispatchResult, Dispatcher, HttpTransport};
use agri_core::{AgriError, Result, Tool};
use agri_telemetry::{Instrument, tool_execute_span};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One agent consulted while answering a query.
#[derive(Debug, Clone)]
pub struct Consultation {
    pub agent: String,
    pub outcome: DispatchResult,
}

/// The orchestrator's reply to a query.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub intents: Vec<Intent>,
    pub consultations: Vec<Consultation>,
}

impl Answer {
    pub fn consulted_agents(&self) -> Vec<&str> {
        self.consultations.iter().map(|c| c.agent.as_str()).collect()
    }
}

/// Routes farmer queries to the specialist agents and presents their
/// answers verbatim.
pub struct Orchestrator {
    dispatcher: Dispatcher,
    routing: RoutingTable,
    classifier: Arc<dyn IntentClassifier>,
    tools: Vec<Arc<dyn Tool>>,
}

impl Orchestrator {
    pub fn new(dispatcher: Dispatcher, routing: RoutingTable) -> Self {
        let tools = all_tools(dispatcher.clone(), &routing);
        Self { dispatcher, routing, classifier: Arc::new(KeywordClassifier::new()), tools }
    }

    /// Discover the configured agents over HTTP and build an orchestrator
    /// around whichever of them answered.
    pub async fn discover(config: &OrchestratorConfig) -> Result<(Self, DiscoveryReport)> {
        let client = config.client_config()?;
        let transport = HttpTransport::new(client.request_timeout)
            .map_err(|e| AgriError::Config(e.to_string()))?;

        let (registry, report) =
            AgentRegistry::discover(&config.directory(), Arc::new(transport), client.discovery_timeout)
                .await;
        if !report.is_success() {
            warn!(configured = report.configured(), "No agents could be discovered");
        }

        let dispatcher = Dispatcher::new(Arc::new(registry));
        Ok((Self::new(dispatcher, config.routing_table()), report))
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Run one tool by name.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value> {
        let Some(tool) = self.tool(name) else {
            let known: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
            return Err(AgriError::Tool(format!(
                "unknown tool '{name}'. Available tools: {}",
                known.join(", ")
            )));
        };
        tool.execute(args).instrument(tool_execute_span(name)).await
    }

    /// Classify `query`, ask every routed agent concurrently and quote the
    /// answers under the name of the agent consulted.
    pub async fn handle(&self, query: &str) -> Answer {
        let intents = self.classifier.classify(query);
        let registry = self.dispatcher.registry();
        let routed = self.routing.agents_for(&intents);
        let (available, missing): (Vec<&str>, Vec<&str>) =
            routed.into_iter().partition(|agent| registry.contains(agent));

        debug!(?intents, ?available, ?missing, "Routed query");

        if available.is_empty() {
            let text = fallback(&intents, &missing, &registry.list_available_agents());
            info!(?intents, "No routed agent available, answering with fallback");
            return Answer { text, intents, consultations: Vec::new() };
        }

        let outcomes = join_all(available.iter().map(|agent| self.dispatcher.send(agent, query))).await;
        let consultations: Vec<Consultation> = available
            .iter()
            .zip(outcomes)
            .map(|(agent, outcome)| Consultation { agent: agent.to_string(), outcome })
            .collect();

        let mut sections: Vec<String> = consultations.iter().map(present).collect();
        if !missing.is_empty() {
            sections.push(format!("Not consulted (currently unavailable): {}", missing.join(", ")));
        }

        info!(consulted = consultations.len(), "Query answered");
        Answer { text: sections.join("\n\n---\n\n"), intents, consultations }
    }
}

fn present(consultation: &Consultation) -> String {
    match &consultation.outcome {
        Ok(text) => format!("I consulted the {}. Here's their detailed response:\n\n{text}", consultation.agent),
        Err(e) => format!("I tried to consult the {}, but the request failed:\n\n{e}", consultation.agent),
    }
}

fn fallback(intents: &[Intent], missing: &[&str], available: &[String]) -> String {
    let listing = if available.is_empty() {
        "No specialized agents are currently available. Please check agent connections.".to_string()
    } else {
        format!("Available agents: {}", available.join(", "))
    };

    if intents.is_empty() {
        format!(
            "I couldn't match your question to a market, weather or schemes specialist. \
             Please rephrase it with the crop, place or scheme you are asking about.\n\n{listing}"
        )
    } else {
        format!(
            "The agent needed for this question is not available right now: {}.\n\n{listing}",
            missing.join(", ")
        )
    }
}
