//! Query classification and the intent to agent routing table.

use crate::config::{MARKET_AGENT, SCHEMES_AGENT, WEATHER_AGENT};
use serde::Serialize;
use std::fmt;

/// Domain a farmer's question belongs to. Ordering is the presentation
/// order when a query spans several domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Market,
    Weather,
    Schemes,
}

impl Intent {
    pub const ALL: [Intent; 3] = [Intent::Market, Intent::Weather, Intent::Schemes];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Market => "market",
            Intent::Weather => "weather",
            Intent::Schemes => "schemes",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides which domains a query touches.
pub trait IntentClassifier: Send + Sync {
    /// Matching intents in [`Intent`] order, without duplicates. Empty when
    /// nothing matches.
    fn classify(&self, query: &str) -> Vec<Intent>;
}

const MARKET_KEYWORDS: &[&str] = &[
    "commodit", "price", "market", "mandi", "trade", "trading", "trader", "sell", "buy", "msp",
    "export", "demand", "arrival",
];

const WEATHER_KEYWORDS: &[&str] = &[
    "weather", "soil", "climate", "fertili", "urea", "irrigat", "rain", "spray", "monsoon",
    "forecast", "temperature", "humid", "drought", "frost", "wind", "sowing",
];

const SCHEMES_KEYWORDS: &[&str] = &[
    "scheme", "subsid", "loan", "insurance", "application", "eligib", "yojana", "kisan",
    "credit", "government",
];

/// Keyword routing. A keyword matches any word of the query that starts
/// with it, so `price` matches "prices" while `rain` does not match "grain".
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<(Intent, Vec<String>)>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            keywords: vec![
                (Intent::Market, owned(MARKET_KEYWORDS)),
                (Intent::Weather, owned(WEATHER_KEYWORDS)),
                (Intent::Schemes, owned(SCHEMES_KEYWORDS)),
            ],
        }
    }
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add extra lowercase keyword prefixes for `intent`.
    pub fn with_keywords(mut self, intent: Intent, extra: &[&str]) -> Self {
        if let Some((_, words)) = self.keywords.iter_mut().find(|(i, _)| *i == intent) {
            words.extend(extra.iter().map(|w| w.to_lowercase()));
        }
        self
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, query: &str) -> Vec<Intent> {
        let lowered = query.to_lowercase();
        let words: Vec<&str> =
            lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect();

        let mut intents: Vec<Intent> = self
            .keywords
            .iter()
            .filter(|(_, keywords)| {
                keywords.iter().any(|k| words.iter().any(|w| w.starts_with(k.as_str())))
            })
            .map(|(intent, _)| *intent)
            .collect();
        intents.sort();
        intents.dedup();
        intents
    }
}

/// Which registered agent answers each intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    market: String,
    weather: String,
    schemes: String,
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self {
            market: MARKET_AGENT.to_string(),
            weather: WEATHER_AGENT.to_string(),
            schemes: SCHEMES_AGENT.to_string(),
        }
    }
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, intent: Intent, agent: impl Into<String>) -> Self {
        let agent = agent.into();
        match intent {
            Intent::Market => self.market = agent,
            Intent::Weather => self.weather = agent,
            Intent::Schemes => self.schemes = agent,
        }
        self
    }

    pub fn agent_for(&self, intent: Intent) -> &str {
        match intent {
            Intent::Market => &self.market,
            Intent::Weather => &self.weather,
            Intent::Schemes => &self.schemes,
        }
    }

    /// Agents for `intents`, in order, each listed once.
    pub fn agents_for(&self, intents: &[Intent]) -> Vec<&str> {
        let mut agents: Vec<&str> = Vec::new();
        for intent in intents {
            let agent = self.agent_for(*intent);
            if !agents.contains(&agent) {
                agents.push(agent);
            }
        }
        agents
    }
}
