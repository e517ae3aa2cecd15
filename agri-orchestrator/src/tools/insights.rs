use super::string_args_schema;
use crate::routing::{Intent, RoutingTable};
use crate::synthesis::{self, RegionReplies};
use agri_a2a::{DispatchResult, Dispatcher};
use agri_core::{AgriError, Result, Tool, required_str, required_str_list};
use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// The market and weather agents the composed tools consult.
pub struct Specialists {
    dispatcher: Dispatcher,
    market: String,
    weather: String,
}

impl Specialists {
    pub fn new(dispatcher: Dispatcher, routing: &RoutingTable) -> Self {
        Self {
            dispatcher,
            market: routing.agent_for(Intent::Market).to_string(),
            weather: routing.agent_for(Intent::Weather).to_string(),
        }
    }

    pub fn missing_agents(&self) -> Vec<&str> {
        [self.market.as_str(), self.weather.as_str()]
            .into_iter()
            .filter(|name| !self.dispatcher.registry().contains(name))
            .collect()
    }

    /// Refusal text when either specialist is not registered.
    fn unavailable(&self, purpose: &str) -> Option<String> {
        let missing = self.missing_agents();
        if missing.is_empty() {
            return None;
        }
        Some(format!(
            "**Agent Unavailable Error**\n\nThe following required agents are not available: {}\n\n\
             Please ensure these agents are running and accessible before requesting {purpose}.",
            missing.join(", ")
        ))
    }

    /// Query both specialists concurrently.
    async fn ask(&self, market_query: &str, weather_query: &str) -> (DispatchResult, DispatchResult) {
        tokio::join!(
            self.dispatcher.send(&self.market, market_query),
            self.dispatcher.send(&self.weather, weather_query),
        )
    }

    fn labelled(&self, market: DispatchResult, weather: DispatchResult) -> Vec<(String, DispatchResult)> {
        vec![(self.market.clone(), market), (self.weather.clone(), weather)]
    }
}

pub struct GetMarketWeatherInsightsTool {
    specialists: Arc<Specialists>,
}

impl GetMarketWeatherInsightsTool {
    pub fn new(specialists: Arc<Specialists>) -> Self {
        Self { specialists }
    }
}

#[async_trait]
impl Tool for GetMarketWeatherInsightsTool {
    fn name(&self) -> &str {
        "get_market_weather_insights"
    }

    fn description(&self) -> &str {
        "Get combined market and weather insights for farming decisions"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(string_args_schema(&[
            ("commodity", "Crop or commodity, e.g. onion"),
            ("location", "Market town, district or state"),
            ("time_period", "Period of interest, e.g. this week"),
        ]))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let commodity = required_str(self.name(), &args, "commodity")?;
        let location = required_str(self.name(), &args, "location")?;
        let time_period = required_str(self.name(), &args, "time_period")?;

        if let Some(refusal) = self.specialists.unavailable("market-weather insights") {
            return Ok(Value::String(refusal));
        }

        info!(commodity, location, "Getting market and weather insights");
        let (market, weather) = self
            .specialists
            .ask(
                &format!("Get {commodity} prices in {location} for {time_period}"),
                &format!("Get weather forecast for {location} for {time_period}"),
            )
            .await;

        Ok(Value::String(synthesis::market_weather_report(
            commodity,
            location,
            time_period,
            &market,
            &weather,
        )))
    }
}

pub struct AnalyzeFarmingConditionsTool {
    specialists: Arc<Specialists>,
}

impl AnalyzeFarmingConditionsTool {
    pub fn new(specialists: Arc<Specialists>) -> Self {
        Self { specialists }
    }
}

#[async_trait]
impl Tool for AnalyzeFarmingConditionsTool {
    fn name(&self) -> &str {
        "analyze_farming_conditions"
    }

    fn description(&self) -> &str {
        "Analyze farming conditions by combining market intelligence with weather and soil data"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(string_args_schema(&[
            ("crop", "Crop to analyze, e.g. wheat"),
            ("location", "District or state"),
        ]))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let crop = required_str(self.name(), &args, "crop")?;
        let location = required_str(self.name(), &args, "location")?;

        if let Some(refusal) = self.specialists.unavailable("farming conditions analysis") {
            return Ok(Value::String(refusal));
        }

        info!(crop, location, "Analyzing farming conditions");
        let (market, weather) = self
            .specialists
            .ask(
                &format!("Get current market conditions and prices for {crop} in {location}"),
                &format!("Get current weather conditions and soil conditions for {crop} farming in {location}"),
            )
            .await;

        let replies = self.specialists.labelled(market, weather);
        Ok(Value::String(synthesis::farming_conditions_report(crop, location, &replies)))
    }
}

pub struct GetSeasonalAdviceTool {
    specialists: Arc<Specialists>,
}

impl GetSeasonalAdviceTool {
    pub fn new(specialists: Arc<Specialists>) -> Self {
        Self { specialists }
    }
}

#[async_trait]
impl Tool for GetSeasonalAdviceTool {
    fn name(&self) -> &str {
        "get_seasonal_advice"
    }

    fn description(&self) -> &str {
        "Get seasonal agricultural advice combining market trends and weather patterns"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(string_args_schema(&[
            ("crop", "Crop to plan for"),
            ("location", "District or state"),
            ("season", "Season, e.g. kharif or rabi"),
        ]))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let crop = required_str(self.name(), &args, "crop")?;
        let location = required_str(self.name(), &args, "location")?;
        let season = required_str(self.name(), &args, "season")?;

        if let Some(refusal) = self.specialists.unavailable("seasonal advice") {
            return Ok(Value::String(refusal));
        }

        info!(crop, location, season, "Getting seasonal advice");
        let (market, weather) = self
            .specialists
            .ask(
                &format!("Get seasonal market trends and price forecasts for {crop} in {location} for {season}"),
                &format!("Get seasonal weather patterns and farming recommendations for {crop} in {location} for {season}"),
            )
            .await;

        let replies = self.specialists.labelled(market, weather);
        Ok(Value::String(synthesis::seasonal_report(crop, location, season, &replies)))
    }
}

pub struct CompareRegionalConditionsTool {
    specialists: Arc<Specialists>,
}

impl CompareRegionalConditionsTool {
    pub fn new(specialists: Arc<Specialists>) -> Self {
        Self { specialists }
    }
}

#[async_trait]
impl Tool for CompareRegionalConditionsTool {
    fn name(&self) -> &str {
        "compare_regional_conditions"
    }

    fn description(&self) -> &str {
        "Compare farming conditions for a crop across different Indian regions"
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "crop": {"type": "string", "description": "Crop to compare"},
                "regions": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "States or districts to compare"
                }
            },
            "required": ["crop", "regions"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let crop = required_str(self.name(), &args, "crop")?;
        let regions = required_str_list(self.name(), &args, "regions")?;
        if regions.is_empty() {
            return Err(AgriError::Tool(format!("{}: 'regions' must not be empty", self.name())));
        }

        if let Some(refusal) = self.specialists.unavailable("a regional comparison") {
            return Ok(Value::String(refusal));
        }

        info!(crop, regions = regions.len(), "Comparing regional conditions");
        let lookups = regions.into_iter().map(|region| async move {
            let (market, weather) = self
                .specialists
                .ask(
                    &format!("Get market conditions and prices for {crop} in {region}"),
                    &format!("Get weather and soil conditions for {crop} farming in {region}"),
                )
                .await;
            RegionReplies { region, market, weather }
        });
        let replies = join_all(lookups).await;

        Ok(Value::String(synthesis::regional_report(crop, &replies)))
    }
}
