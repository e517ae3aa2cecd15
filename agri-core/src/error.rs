#[derive(Debug, thiserror::Error)]
pub enum AgriError {
    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AgriError {
    /// Shorthand for a tool argument problem.
    pub fn missing_arg(tool: &str, arg: &str) -> Self {
        AgriError::Tool(format!("{tool}: missing required argument '{arg}'"))
    }
}

pub type Result<T> = std::result::Result<T, AgriError>;
