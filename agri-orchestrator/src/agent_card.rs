use agri_a2a::{AgentCard, AgentSkill};
use agri_a2a::a2a::AgentCapabilities;

pub const ORCHESTRATOR_NAME: &str = "Agricultural Intelligence Orchestrator";

/// Card served at the orchestrator's well-known path, advertising `url`.
pub fn orchestrator_card(url: &str) -> AgentCard {
    AgentCard::builder()
        .name(ORCHESTRATOR_NAME)
        .description(
            "Intelligent coordinator providing comprehensive agricultural support by orchestrating \
             specialized market, weather and schemes agents for Indian farmers. Combines market \
             intelligence, weather forecasts, and soil conditions for holistic farming advice.",
        )
        .url(url)
        .version("1.0.0")
        .capabilities(AgentCapabilities::default())
        .skills(skills())
        .build()
}

fn skills() -> Vec<AgentSkill> {
    vec![
        AgentSkill::new(
            "market_weather_insights",
            "Market + Weather Intelligence",
            "Get combined commodity prices and weather forecasts for optimal farming decisions",
            &["market", "weather", "prices", "forecast", "farming", "agriculture", "india"],
        )
        .with_examples(&[
            "What are the current onion prices in Mumbai and how will the weather affect farming?",
            "Get potato prices in Delhi today along with weather forecast for farming decisions",
            "Show rice prices in Punjab this week with weather conditions for planting",
        ]),
        AgentSkill::new(
            "farming_conditions_analysis",
            "Comprehensive Farming Conditions",
            "Analyze current farming conditions using market intelligence and weather data",
            &["farming", "conditions", "analysis", "market", "weather", "soil", "agriculture"],
        )
        .with_examples(&[
            "Analyze farming conditions for wheat in Haryana",
            "What are the current conditions for tomato farming in Maharashtra?",
            "Assess farming conditions for cotton in Gujarat",
        ]),
        AgentSkill::new(
            "seasonal_agricultural_planning",
            "Seasonal Agricultural Planning",
            "Get seasonal advice combining market trends and weather patterns for crop planning",
            &["seasonal", "planning", "crops", "market", "weather", "agriculture", "india"],
        )
        .with_examples(&[
            "Plan my crop rotation for the next 6 months in Bihar",
            "When should I start preparing for monsoon crops in Kerala?",
            "Best crops to plant in Rajasthan this season considering market and weather",
        ]),
        AgentSkill::new(
            "regional_farming_comparison",
            "Regional Farming Comparison",
            "Compare farming conditions across different Indian states and regions",
            &["regional", "comparison", "states", "farming", "market", "weather", "agriculture"],
        )
        .with_examples(&[
            "Compare farming conditions for tomatoes across Maharashtra and Karnataka",
            "Which region is better for wheat farming: Punjab or Haryana?",
            "Compare rice farming conditions in West Bengal vs Tamil Nadu",
        ]),
        AgentSkill::new(
            "agent_orchestration",
            "Intelligent Agent Orchestration",
            "Coordinate multiple specialized agents for comprehensive agricultural intelligence",
            &["orchestration", "multi-agent", "coordination", "intelligence", "agriculture"],
        )
        .with_examples(&[
            "What agents are available for agricultural queries?",
            "Get capabilities of the Market Intelligence Agent",
            "How does the orchestrator work with specialized agents?",
        ]),
    ]
}
