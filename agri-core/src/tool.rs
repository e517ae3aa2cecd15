use crate::{AgriError, Result};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// JSON schema of the `args` object accepted by [`Tool::execute`].
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    async fn execute(&self, args: Value) -> Result<Value>;
}

/// Fetches a required string argument from a tool call.
pub fn required_str<'a>(tool: &str, args: &'a Value, name: &str) -> Result<&'a str> {
    args.get(name).and_then(Value::as_str).ok_or_else(|| AgriError::missing_arg(tool, name))
}

/// Fetches a required array-of-strings argument from a tool call.
pub fn required_str_list(tool: &str, args: &Value, name: &str) -> Result<Vec<String>> {
    let items = args
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| AgriError::missing_arg(tool, name))?;

    items
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                AgriError::Tool(format!("{tool}: '{name}' must contain only strings"))
            })
        })
        .collect()
}
