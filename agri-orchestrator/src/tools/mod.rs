//! Tools the orchestrator exposes: direct delegation, agent directory
//! lookups, and composed market + weather reports.

mod directory;
mod insights;
mod messaging;

pub use directory::{GetAgentCapabilitiesTool, ListAvailableAgentsTool};
pub use insights::{
    AnalyzeFarmingConditionsTool, CompareRegionalConditionsTool, GetMarketWeatherInsightsTool,
    GetSeasonalAdviceTool, Specialists,
};
pub use messaging::SendMessageTool;

use crate::routing::RoutingTable;
use agri_a2a::Dispatcher;
use agri_core::Tool;
use serde_json::{Value, json};
use std::sync::Arc;

/// Every orchestrator tool, sharing one dispatcher.
pub fn all_tools(dispatcher: Dispatcher, routing: &RoutingTable) -> Vec<Arc<dyn Tool>> {
    let specialists = Arc::new(Specialists::new(dispatcher.clone(), routing));
    vec![
        Arc::new(SendMessageTool::new(dispatcher.clone())),
        Arc::new(ListAvailableAgentsTool::new(dispatcher.clone())),
        Arc::new(GetAgentCapabilitiesTool::new(dispatcher)),
        Arc::new(GetMarketWeatherInsightsTool::new(specialists.clone())),
        Arc::new(AnalyzeFarmingConditionsTool::new(specialists.clone())),
        Arc::new(GetSeasonalAdviceTool::new(specialists.clone())),
        Arc::new(CompareRegionalConditionsTool::new(specialists)),
    ]
}

/// Object schema with the given string properties, all required.
fn string_args_schema(props: &[(&str, &str)]) -> Value {
    let properties: serde_json::Map<String, Value> = props
        .iter()
        .map(|(name, description)| {
            (name.to_string(), json!({"type": "string", "description": description}))
        })
        .collect();
    let required: Vec<&str> = props.iter().map(|(name, _)| *name).collect();
    json!({"type": "object", "properties": properties, "required": required})
}
