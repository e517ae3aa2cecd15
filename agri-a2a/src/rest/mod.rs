pub mod controllers;

pub use controllers::A2aController;

use crate::a2a::AGENT_CARD_PATH;
use crate::config::SecurityConfig;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

fn build_cors_layer(security: &SecurityConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if security.allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::any())
    } else {
        let origins: Vec<HeaderValue> =
            security.allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

/// Router serving one agent over A2A: the card at the well-known path and
/// JSON-RPC at the root.
pub fn create_app(controller: A2aController) -> Router {
    let security = controller.security().clone();

    let app = Router::new()
        .route(AGENT_CARD_PATH, get(controllers::a2a::get_agent_card))
        .route("/", post(controllers::a2a::handle_jsonrpc))
        .with_state(controller)
        .route("/health", get(health_check));

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, security.request_timeout))
            .layer(DefaultBodyLimit::max(security.max_body_size))
            .layer(build_cors_layer(&security))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            )),
    )
}

async fn health_check() -> &'static str {
    "OK"
}
