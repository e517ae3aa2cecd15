//! Report templates for the composed market + weather tools.
//!
//! The "insights" here are keyword heuristics over the agents' free text.
//! They never replace the agents' answers, which are always quoted in full
//! (regional comparisons quote a bounded excerpt per source).

use agri_a2a::{DispatchResult, preview};
use std::borrow::Cow;

/// Characters kept from each source in a regional comparison.
pub const REGIONAL_EXCERPT_CHARS: usize = 200;

/// An agent's answer, or its error rendering.
pub fn render(result: &DispatchResult) -> Cow<'_, str> {
    match result {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => Cow::Owned(e.to_string()),
    }
}

fn answer_lower(result: &DispatchResult) -> String {
    result.as_deref().map(str::to_lowercase).unwrap_or_default()
}

pub fn market_timing(market: &DispatchResult) -> &'static str {
    let text = answer_lower(market);
    if text.contains("price") && text.contains("trend") {
        "Monitor price trends closely for optimal selling timing"
    } else if text.contains("high") && text.contains("price") {
        "Current high prices suggest good selling opportunity"
    } else {
        "Review market data for timing decisions"
    }
}

pub fn weather_considerations(weather: &DispatchResult) -> &'static str {
    let text = answer_lower(weather);
    if text.contains("rain") {
        "Rain expected - plan irrigation accordingly"
    } else if text.contains("dry") || text.contains("drought") {
        "Dry conditions - ensure adequate irrigation"
    } else {
        "Weather conditions appear favorable for farming"
    }
}

pub fn assess_risks(market: &DispatchResult, weather: &DispatchResult) -> String {
    let mut risks = Vec::new();
    if market.is_err() {
        risks.push("Market data unavailable");
    }
    if weather.is_err() {
        risks.push("Weather data unavailable");
    }
    if risks.is_empty() {
        risks.push("Low risk - data available from both sources");
    }
    risks.join("; ")
}

pub fn action_items(market: &DispatchResult, weather: &DispatchResult) -> String {
    let market = answer_lower(market);
    let weather = answer_lower(weather);

    let mut actions = Vec::new();
    if market.contains("plant") || market.contains("sow") {
        actions.push("Consider planting timing based on market conditions");
    }
    if market.contains("harvest") {
        actions.push("Plan harvest based on market prices");
    }
    if weather.contains("irrigation") {
        actions.push("Adjust irrigation based on weather forecast");
    }
    if actions.is_empty() {
        actions.push("Monitor conditions and adjust farming practices accordingly");
    }
    actions.join("; ")
}

/// Each agent's full answer under its name.
pub fn format_agent_responses(replies: &[(String, DispatchResult)]) -> String {
    let mut out = String::new();
    for (agent, result) in replies {
        out.push_str(&format!("**{agent}**:\n{}\n\n", render(result)));
    }
    out
}

pub fn market_weather_report(
    commodity: &str,
    location: &str,
    time_period: &str,
    market: &DispatchResult,
    weather: &DispatchResult,
) -> String {
    format!(
        "**Agricultural Intelligence for {commodity} in {location}** ({time_period})\n\n\
         **Market Insights:**\n{}\n\n\
         **Weather Conditions:**\n{}\n\n\
         **Farming Recommendations:**\n\
         Based on the market and weather data above, here are your key farming insights for {commodity} in {location}:\n\n\
         • **Market Timing**: {}\n\
         • **Weather Considerations**: {}\n\
         • **Risk Assessment**: {}\n\
         • **Action Items**: {}\n\n\
         This analysis combines real-time market data with weather forecasts to help you make informed farming decisions.",
        render(market),
        render(weather),
        market_timing(market),
        weather_considerations(weather),
        assess_risks(market, weather),
        action_items(market, weather),
    )
}

/// `replies` is `[market, weather]` in that order.
pub fn farming_conditions_report(
    crop: &str,
    location: &str,
    replies: &[(String, DispatchResult)],
) -> String {
    format!(
        "**Farming Conditions Analysis for {crop} in {location}**\n\n\
         **Comprehensive Assessment:**\n{}\
         **Key Insights:**\n\
         • **Current Conditions**: Combined market and weather data indicates current farming conditions\n\
         • **Risk Factors**: {}\n\
         • **Opportunities**: Market and weather data may reveal farming opportunities\n\
         • **Recommendations**: Based on current conditions, adjust {crop} farming practices accordingly\n\n\
         This analysis provides a holistic view of farming conditions by combining market intelligence with weather and soil data.",
        format_agent_responses(replies),
        risk_factors(replies),
    )
}

fn risk_factors(replies: &[(String, DispatchResult)]) -> String {
    let failed: Vec<&str> =
        replies.iter().filter(|(_, r)| r.is_err()).map(|(agent, _)| agent.as_str()).collect();
    if failed.is_empty() {
        "Review responses for specific risk factors".to_string()
    } else {
        format!("No data from {}; decide with caution", failed.join(", "))
    }
}

pub fn seasonal_report(
    crop: &str,
    location: &str,
    season: &str,
    replies: &[(String, DispatchResult)],
) -> String {
    format!(
        "**Seasonal Agricultural Advice for {crop} in {location}** ({season})\n\n\
         **Seasonal Insights:**\n{}\
         **Seasonal Planning:**\n\
         • **Preparation Phase**: Review seasonal data for preparation requirements\n\
         • **Planting Window**: Weather data indicates optimal planting timing\n\
         • **Care Requirements**: Adjust care based on weather and market conditions\n\
         • **Harvest Timing**: Plan harvest based on market prices and weather\n\n\
         **Action Plan for {season}:**\n\
         Follow seasonal best practices for {crop} in {season}",
        format_agent_responses(replies),
    )
}

/// Market and weather answers for one region.
#[derive(Debug, Clone)]
pub struct RegionReplies {
    pub region: String,
    pub market: DispatchResult,
    pub weather: DispatchResult,
}

pub fn format_regional_responses(regions: &[RegionReplies]) -> String {
    let mut out = String::new();
    for r in regions {
        out.push_str(&format!("**{}**:\n", r.region));
        for (source, result) in [("market", &r.market), ("weather", &r.weather)] {
            let excerpt = preview(&render(result), REGIONAL_EXCERPT_CHARS);
            out.push_str(&format!("  {source}: {excerpt}\n"));
        }
        out.push('\n');
    }
    out
}

pub fn regional_report(crop: &str, regions: &[RegionReplies]) -> String {
    let names: Vec<&str> = regions.iter().map(|r| r.region.as_str()).collect();
    format!(
        "**Regional Farming Conditions Comparison for {crop}**\n\n\
         **Regional Analysis:**\n{}\
         **Regional Rankings:**\n\
         Ranking based on combined market and weather conditions for {crop}\n\n\
         **Cross-Regional Insights:**\n\
         • **Regions Compared**: {}\n\
         • **Data Coverage**: {}\n\
         • **Regional Advantages**: Each region has unique advantages for farming\n\n\
         **Strategic Recommendations:**\n\
         Develop region-specific strategies for {crop} farming",
        format_regional_responses(regions),
        names.join(", "),
        regional_coverage(regions),
    )
}

fn regional_coverage(regions: &[RegionReplies]) -> String {
    let incomplete: Vec<&str> = regions
        .iter()
        .filter(|r| r.market.is_err() || r.weather.is_err())
        .map(|r| r.region.as_str())
        .collect();
    if incomplete.is_empty() {
        "Market and weather data available for every region".to_string()
    } else {
        format!("Incomplete data for {}", incomplete.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_a2a::DispatchError;

    fn ok(text: &str) -> DispatchResult {
        Ok(text.to_string())
    }

    fn down(agent: &str) -> DispatchResult {
        Err(DispatchError::Transport { agent: agent.into(), detail: "connection failed: refused".into() })
    }

    #[test]
    fn test_market_timing() {
        assert_eq!(
            market_timing(&ok("Onion price trend is upward")),
            "Monitor price trends closely for optimal selling timing"
        );
        assert_eq!(
            market_timing(&ok("Prices are HIGH at Azadpur")),
            "Current high prices suggest good selling opportunity"
        );
        assert_eq!(market_timing(&down("market")), "Review market data for timing decisions");
    }

    #[test]
    fn test_weather_considerations() {
        assert_eq!(weather_considerations(&ok("Heavy rain expected")), "Rain expected - plan irrigation accordingly");
        assert_eq!(weather_considerations(&ok("Drought warning")), "Dry conditions - ensure adequate irrigation");
        assert_eq!(weather_considerations(&ok("Clear skies")), "Weather conditions appear favorable for farming");
    }

    #[test]
    fn test_risks_follow_dispatch_outcome() {
        assert_eq!(assess_risks(&ok("error-free data"), &ok("sunny")), "Low risk - data available from both sources");
        assert_eq!(
            assess_risks(&down("market"), &down("weather")),
            "Market data unavailable; Weather data unavailable"
        );
    }

    #[test]
    fn test_action_items() {
        assert_eq!(
            action_items(&ok("Good time to sow; harvest prices firm"), &ok("plan irrigation twice")),
            "Consider planting timing based on market conditions; Plan harvest based on market prices; Adjust irrigation based on weather forecast"
        );
        assert_eq!(action_items(&ok(""), &ok("")), "Monitor conditions and adjust farming practices accordingly");
    }

    #[test]
    fn test_market_weather_report_quotes_answers() {
        let report = market_weather_report("onion", "Nashik", "this week", &ok("Onion ₹20/kg"), &down("weather"));
        assert!(report.starts_with("**Agricultural Intelligence for onion in Nashik** (this week)"));
        assert!(report.contains("Onion ₹20/kg"));
        assert!(report.contains("Error communicating with weather"));
        assert!(report.contains("• **Risk Assessment**: Weather data unavailable"));
    }

    #[test]
    fn test_regional_excerpt_is_bounded() {
        let long = "क".repeat(500);
        let regions = vec![RegionReplies { region: "Punjab".into(), market: Ok(long), weather: ok("short") }];
        let formatted = format_regional_responses(&regions);
        let market_line = formatted.lines().nth(1).unwrap();
        assert_eq!(market_line, format!("  market: {}...", "क".repeat(200)));
        assert!(formatted.contains("  weather: short\n"));
    }

    #[test]
    fn test_regional_report_coverage() {
        let regions = vec![
            RegionReplies { region: "Punjab".into(), market: ok("a"), weather: ok("b") },
            RegionReplies { region: "Haryana".into(), market: down("market"), weather: ok("c") },
        ];
        let report = regional_report("wheat", &regions);
        assert!(report.contains("• **Regions Compared**: Punjab, Haryana"));
        assert!(report.contains("• **Data Coverage**: Incomplete data for Haryana"));
    }
}
