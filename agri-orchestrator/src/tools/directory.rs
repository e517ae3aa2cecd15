use super::string_args_schema;
use agri_a2a::{AgentCard, Dispatcher, RegistryEntry};
use agri_core::{Result, Tool, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};

const LISTED_TAGS: usize = 5;
const LISTED_EXAMPLES: usize = 3;

fn line(out: &mut String, text: String) {
    out.push_str(&text);
    out.push('\n');
}

fn advertised_url(entry: &RegistryEntry) -> &str {
    let card_url = entry.card().url.as_str();
    if card_url.is_empty() { entry.base_url() } else { card_url }
}

/// Every registered agent with its skills.
pub struct ListAvailableAgentsTool {
    dispatcher: Dispatcher,
}

impl ListAvailableAgentsTool {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn render(&self) -> String {
        let registry = self.dispatcher.registry();
        if registry.is_empty() {
            return "No specialized agents are currently available. Please check agent connections."
                .to_string();
        }

        let mut out = String::from("**Available Specialized Agents with Skills:**\n\n");
        for entry in registry.entries() {
            let card = entry.card();
            line(&mut out, format!("**{}**", card.name));
            line(&mut out, card.description.clone());
            line(&mut out, format!("URL: {}", advertised_url(entry)));

            if card.skills.is_empty() {
                out.push_str("Skills: Not specified\n");
            } else {
                line(&mut out, format!("**Skills ({}):**", card.skills.len()));
                for skill in &card.skills {
                    line(&mut out, format!("  • **{}**: {}", skill.name, skill.description));
                    if !skill.tags.is_empty() {
                        let tags: Vec<&str> =
                            skill.tags.iter().take(LISTED_TAGS).map(String::as_str).collect();
                        line(&mut out, format!("    Tags: {}", tags.join(", ")));
                    }
                    if let Some(example) = skill.examples.first() {
                        line(&mut out, format!("    Example: \"{example}\""));
                    }
                }
            }
            out.push('\n');
        }
        out.push_str(
            "**Usage:** Use `send_message_to_agent` with the exact agent name to delegate \
             specialized queries based on their skills.",
        );
        out
    }
}

#[async_trait]
impl Tool for ListAvailableAgentsTool {
    fn name(&self) -> &str {
        "list_available_agents"
    }

    fn description(&self) -> &str {
        "List available specialized agents with their detailed capabilities from agent cards"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({"type": "object", "properties": {}}))
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        Ok(Value::String(self.render()))
    }
}

/// Full card detail for one agent.
pub struct GetAgentCapabilitiesTool {
    dispatcher: Dispatcher,
}

impl GetAgentCapabilitiesTool {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn render(&self, agent_name: &str) -> String {
        if agent_name.trim().is_empty() {
            return "Please specify an agent name to get capabilities.".to_string();
        }
        match self.dispatcher.registry().get(agent_name) {
            Some(entry) => render_card(entry.card(), advertised_url(entry)),
            None => format!("Agent '{agent_name}' not found or not available."),
        }
    }
}

fn render_card(card: &AgentCard, url: &str) -> String {
    let mut out = format!("**Detailed Agent Capabilities: {}**\n\n", card.name);
    line(&mut out, format!("**Description:** {}", card.description));
    line(&mut out, format!("**URL:** {url}"));
    line(&mut out, format!("**Version:** {}", card.version));
    out.push_str("**Technical Capabilities:**\n");
    line(&mut out, format!("  • Input Modes: {}", card.default_input_modes.join(", ")));
    line(&mut out, format!("  • Output Modes: {}", card.default_output_modes.join(", ")));
    line(&mut out, format!("  • Streaming: {}", if card.capabilities.streaming { "Yes" } else { "No" }));

    if card.skills.is_empty() {
        out.push_str("\n**Skills:** Not specified in agent card\n");
    } else {
        line(&mut out, format!("\n**Skills ({} total):**", card.skills.len()));
        for (i, skill) in card.skills.iter().enumerate() {
            line(&mut out, format!("\n**{}. {}**", i + 1, skill.name));
            line(&mut out, format!("   Description: {}", skill.description));
            if !skill.tags.is_empty() {
                line(&mut out, format!("   Tags: {}", skill.tags.join(", ")));
            }
            if !skill.examples.is_empty() {
                out.push_str("   Examples:\n");
                for example in skill.examples.iter().take(LISTED_EXAMPLES) {
                    line(&mut out, format!("      • \"{example}\""));
                }
            }
        }
    }

    out.push_str(&format!(
        "\n**Usage:** Send queries to this agent using `send_message_to_agent(\"{}\", \"your query\")`",
        card.name
    ));
    out
}

#[async_trait]
impl Tool for GetAgentCapabilitiesTool {
    fn name(&self) -> &str {
        "get_agent_capabilities"
    }

    fn description(&self) -> &str {
        "Get detailed capabilities of a specific agent using their agent card"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(string_args_schema(&[("agent_name", "Exact name of a registered agent")]))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let agent_name = required_str(self.name(), &args, "agent_name")?;
        Ok(Value::String(self.render(agent_name)))
    }
}
