use agri_orchestrator::{Orchestrator, OrchestratorConfig, serve_app};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub async fn run_serve(config: &OrchestratorConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut server = config.server_config()?;
    if let Some(host) = host {
        server = server.with_host(host);
    }
    if let Some(port) = port {
        server = server.with_port(port);
    }

    let (orchestrator, report) = Orchestrator::discover(config).await?;
    info!(
        connected = report.registered.len(),
        configured = report.configured(),
        "Orchestrating specialized agents"
    );
    for failure in &report.failures {
        info!(agent = %failure.name, url = %failure.url, "Agent unavailable; continuing without it");
    }

    let app = serve_app(Arc::new(orchestrator), &server);
    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("Agricultural orchestrator listening on http://{addr}");
    println!("Agent card: {}.well-known/agent.json", server.base_url());
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
