mod common;

use agri_a2a::a2a::TransportError;
use agri_a2a::{AgentDirectory, AgentRegistry, DiscoveryError, DispatchError, Dispatcher};
use common::{MARKET, MockTransport, SCHEMES, WEATHER, task_reply};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const MARKET_URL: &str = "http://localhost:10006";
const WEATHER_URL: &str = "http://localhost:10005";
const SCHEMES_URL: &str = "http://localhost:10004";

fn directory() -> AgentDirectory {
    AgentDirectory::new()
        .with_agent(MARKET, MARKET_URL)
        .with_agent(WEATHER, WEATHER_URL)
        .with_agent(SCHEMES, SCHEMES_URL)
}

async fn dispatcher_for(transport: Arc<MockTransport>) -> Dispatcher {
    let (registry, _) =
        AgentRegistry::discover(&directory(), transport, Duration::from_secs(60)).await;
    Dispatcher::new(Arc::new(registry))
}

#[tokio::test]
async fn test_partial_discovery_registers_resolved_agents() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(MARKET, MARKET_URL)
            .with_agent(SCHEMES, SCHEMES_URL)
            .with_card_error(WEATHER_URL, TransportError::Status { status: 502, url: WEATHER_URL.into() }),
    );

    let (registry, report) =
        AgentRegistry::discover(&directory(), transport, Duration::from_secs(60)).await;

    assert!(report.is_success());
    assert_eq!(registry.list_available_agents(), vec![MARKET, SCHEMES]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, WEATHER);
    assert!(!registry.contains(WEATHER));
}

#[tokio::test]
async fn test_total_discovery_failure() {
    let transport = Arc::new(MockTransport::new());

    let (registry, report) =
        AgentRegistry::discover(&directory(), transport.clone(), Duration::from_secs(60)).await;

    assert!(!report.is_success());
    assert!(registry.is_empty());
    assert_eq!(report.failures.len(), 3);
    assert_eq!(transport.get_calls.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_discovery_deadline_drops_slow_agents() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(MARKET, MARKET_URL)
            .with_agent(WEATHER, WEATHER_URL)
            .with_agent(SCHEMES, SCHEMES_URL)
            .with_card_delay(SCHEMES_URL, Duration::from_secs(90)),
    );

    let (registry, report) =
        AgentRegistry::discover(&directory(), transport, Duration::from_secs(10)).await;

    assert_eq!(registry.list_available_agents(), vec![MARKET, WEATHER]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].error, DiscoveryError::DeadlineExceeded(Duration::from_secs(10)));
}

#[tokio::test]
async fn test_agent_info_and_not_found() {
    let transport = Arc::new(MockTransport::new().with_agent(MARKET, MARKET_URL));
    let dispatcher = dispatcher_for(transport).await;

    let info = dispatcher.registry().get_agent_info(MARKET).unwrap();
    assert_eq!(info.name, MARKET);
    assert_eq!(info.url, MARKET_URL);
    assert_eq!(info.skills, vec![format!("{MARKET} skill")]);

    assert!(dispatcher.registry().get_agent_info("Soil Agent").is_none());
    assert!(dispatcher.registry().agent_card("Soil Agent").is_none());
}

#[tokio::test]
async fn test_unknown_agent_makes_no_network_call() {
    let transport = Arc::new(MockTransport::new().with_agent(MARKET, MARKET_URL));
    let dispatcher = dispatcher_for(transport.clone()).await;

    let err = dispatcher.send("Soil Agent", "soil moisture?").await.unwrap_err();

    assert_eq!(
        err,
        DispatchError::UnknownAgent { name: "Soil Agent".into(), available: vec![MARKET.into()] }
    );
    assert_eq!(transport.posts(), 0);
}

#[tokio::test]
async fn test_successful_round_trip() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(MARKET, MARKET_URL)
            .with_reply(MARKET_URL, task_reply(&["Onion price is ₹20/kg"])),
    );
    let dispatcher = dispatcher_for(transport.clone()).await;

    let answer = dispatcher.send(MARKET, "Onion price in Nashik?").await.unwrap();
    assert_eq!(answer, "Onion price is ₹20/kg");

    let sent = transport.last_post.lock().unwrap().clone().unwrap();
    assert_eq!(sent["method"], "message/send");
    assert_eq!(sent["params"]["message"]["role"], "user");
    assert_eq!(sent["params"]["message"]["parts"][0]["text"], "Onion price in Nashik?");
    assert_eq!(sent["id"], sent["params"]["message"]["messageId"]);
    assert!(uuid::Uuid::parse_str(sent["id"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_multiple_text_parts_are_space_joined() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(WEATHER, WEATHER_URL)
            .with_reply(WEATHER_URL, task_reply(&["A", "B"])),
    );
    let dispatcher = dispatcher_for(transport).await;

    assert_eq!(dispatcher.send(WEATHER, "forecast").await.unwrap(), "A B");
}

#[tokio::test]
async fn test_transport_error_is_contained() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(WEATHER, WEATHER_URL)
            .with_reply_error(WEATHER_URL, TransportError::Connect("connection refused".into())),
    );
    let dispatcher = dispatcher_for(transport).await;

    let err = dispatcher.send(WEATHER, "forecast").await.unwrap_err();
    assert!(matches!(err, DispatchError::Transport { .. }));
    assert!(err.to_string().contains(WEATHER));

    let text = dispatcher.send_text(WEATHER, "forecast").await;
    assert_eq!(text, format!("Error communicating with {WEATHER}: connection failed: connection refused"));
}

#[tokio::test]
async fn test_empty_text_response() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(SCHEMES, SCHEMES_URL)
            .with_reply(SCHEMES_URL, json!({"jsonrpc": "2.0", "id": "1", "result": {"id": "t", "kind": "task", "status": {"state": "completed"}}})),
    );
    let dispatcher = dispatcher_for(transport).await;

    let err = dispatcher.send(SCHEMES, "PM-KISAN eligibility").await.unwrap_err();
    assert_eq!(err, DispatchError::EmptyResponse { agent: SCHEMES.into() });
    assert_eq!(
        dispatcher.send_text(SCHEMES, "PM-KISAN eligibility").await,
        format!("Received response from {SCHEMES} but no text content found")
    );
}

#[tokio::test]
async fn test_rpc_error_and_malformed_result() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(MARKET, MARKET_URL)
            .with_agent(WEATHER, WEATHER_URL)
            .with_reply(
                MARKET_URL,
                json!({"jsonrpc": "2.0", "id": "1", "error": {"code": -32603, "message": "CEDA API down"}}),
            )
            .with_reply(WEATHER_URL, json!({"jsonrpc": "2.0", "id": "1", "result": "sunny"})),
    );
    let dispatcher = dispatcher_for(transport).await;

    let err = dispatcher.send(MARKET, "prices").await.unwrap_err();
    assert_eq!(
        err,
        DispatchError::Rpc { agent: MARKET.into(), code: -32603, message: "CEDA API down".into() }
    );

    let err = dispatcher.send(WEATHER, "forecast").await.unwrap_err();
    assert!(matches!(err, DispatchError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_message_result_is_malformed_not_empty() {
    let transport = Arc::new(MockTransport::new().with_agent(MARKET, MARKET_URL).with_reply(
        MARKET_URL,
        json!({
            "jsonrpc": "2.0",
            "id": "1",
            "result": {"kind": "message", "role": "agent", "parts": [{"kind": "text", "text": "Onion ₹20/kg"}]}
        }),
    ));
    let dispatcher = dispatcher_for(transport).await;

    let err = dispatcher.send(MARKET, "onion price").await.unwrap_err();
    assert!(matches!(err, DispatchError::MalformedResponse { ref agent, .. } if agent == MARKET));
    assert!(err.to_string().contains(MARKET));
}

#[tokio::test]
async fn test_broadcast_collects_every_agent() {
    let transport = Arc::new(
        MockTransport::new()
            .with_agent(MARKET, MARKET_URL)
            .with_agent(WEATHER, WEATHER_URL)
            .with_reply(MARKET_URL, task_reply(&["Tomato ₹35/kg"]))
            .with_reply_error(WEATHER_URL, TransportError::Timeout(Duration::from_secs(30))),
    );
    let dispatcher = dispatcher_for(transport).await;

    let replies = dispatcher.broadcast("tomato outlook in Kolar").await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].0, MARKET);
    assert_eq!(replies[0].1.as_deref(), Ok("Tomato ₹35/kg"));
    assert_eq!(replies[1].0, WEATHER);
    assert!(matches!(replies[1].1, Err(DispatchError::Timeout { .. })));
}
