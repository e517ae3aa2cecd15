//! One-shot commands: `agents`, `ask` and `tool`.

use agri_orchestrator::{Orchestrator, OrchestratorConfig};
use anyhow::{Context, Result, bail};
use serde_json::Value;

async fn connect(config: &OrchestratorConfig) -> Result<Orchestrator> {
    let (orchestrator, report) = Orchestrator::discover(config).await?;
    for failure in &report.failures {
        eprintln!("warning: {} ({}) unavailable: {}", failure.name, failure.url, failure.error);
    }
    Ok(orchestrator)
}

pub async fn run_agents(config: &OrchestratorConfig) -> Result<()> {
    let orchestrator = connect(config).await?;
    let listing = orchestrator.call_tool("list_available_agents", Value::Null).await?;
    println!("{}", render(&listing));
    Ok(())
}

pub async fn run_ask(config: &OrchestratorConfig, query: &str) -> Result<()> {
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }
    let orchestrator = connect(config).await?;
    let answer = orchestrator.handle(query).await;
    println!("{}", answer.text);
    Ok(())
}

pub async fn run_tool(config: &OrchestratorConfig, name: &str, raw_args: &str) -> Result<()> {
    let args: Value = serde_json::from_str(raw_args).context("--args must be a JSON object")?;
    if !args.is_object() {
        bail!("--args must be a JSON object, got {args}");
    }
    let orchestrator = connect(config).await?;
    let result = orchestrator.call_tool(name, args).await?;
    println!("{}", render(&result));
    Ok(())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
