//! The orchestrator served over A2A.

mod common;

use agri_a2a::ServerConfig;
use agri_orchestrator::{MARKET_AGENT, ORCHESTRATOR_NAME, serve_app};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::{MARKET_URL, all_agents, orchestrator};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn app() -> (Router, Arc<common::FakeAgents>) {
    let agents = Arc::new(all_agents());
    let orchestrator = Arc::new(orchestrator(agents.clone()).await);
    let server = ServerConfig::default().with_port(18007);
    (serve_app(orchestrator, &server), agents)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, text: &str) -> Value {
    let body = json!({
        "jsonrpc": "2.0",
        "id": "req-9",
        "method": "message/send",
        "params": {"message": {"role": "user", "messageId": "m-9", "parts": [{"kind": "text", "text": text}]}}
    });
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_card_advertises_server_url() {
    let (app, _) = app().await;
    let response = app
        .oneshot(Request::builder().uri("/.well-known/agent.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let card = body_json(response).await;
    assert_eq!(card["name"], ORCHESTRATOR_NAME);
    assert_eq!(card["url"], "http://localhost:18007/");
    assert_eq!(card["skills"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_message_send_strips_user_id_and_records_metadata() {
    let (app, agents) = app().await;

    let response = send(app, "user_id: farmer-11\n\nOnion price in Pimpalgaon?").await;
    let task = &response["result"];

    assert_eq!(task["status"]["state"], "completed");
    assert_eq!(agents.questions_to(MARKET_URL), vec!["Onion price in Pimpalgaon?"]);
    assert_eq!(task["metadata"]["user_id"], "farmer-11");
    assert_eq!(task["metadata"]["intents"], json!(["market"]));
    assert_eq!(task["metadata"]["consulted_agents"], json!([MARKET_AGENT]));

    let text = task["artifacts"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(text.starts_with(&format!("I consulted the {MARKET_AGENT}.")));
}

#[tokio::test]
async fn test_empty_query_fails_task() {
    let (app, _) = app().await;

    let response = send(app, "user_id: farmer-11").await;
    assert_eq!(response["result"]["status"]["state"], "failed");
}
