// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use sunlead_core::SunleadError;

use crate::auth::auth_middleware;
use crate::handlers;
use crate::state::{GatewayState, spawn_session_sweeper};

/// Gateway server configuration (mirrors GatewayConfig from sunlead-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Assembles the full route tree over the given state.
///
/// Split from [`start_server`] so tests can drive the router directly
/// without binding a socket.
pub fn build_router(state: GatewayState) -> Router {
    // Unauthenticated public routes: health, the two session surfaces,
    // and the catalog reads the website renders from.
    let public_routes = Router::new()
        .route("/health", get(handlers::health::get_health))
        .route("/v1/chat/sessions", post(handlers::chat::create_session))
        .route(
            "/v1/chat/sessions/{id}",
            get(handlers::chat::get_session).delete(handlers::chat::delete_session),
        )
        .route(
            "/v1/chat/sessions/{id}/messages",
            post(handlers::chat::post_message),
        )
        .route("/v1/quote/sessions", post(handlers::quote::create_session))
        .route("/v1/quote/sessions/{id}", get(handlers::quote::get_session))
        .route(
            "/v1/quote/sessions/{id}/fields",
            post(handlers::quote::set_field),
        )
        .route(
            "/v1/quote/sessions/{id}/advance",
            post(handlers::quote::advance),
        )
        .route(
            "/v1/quote/sessions/{id}/retreat",
            post(handlers::quote::retreat),
        )
        .route(
            "/v1/quote/sessions/{id}/submit",
            post(handlers::quote::submit),
        )
        .route(
            "/v1/quote/sessions/{id}/reset",
            post(handlers::quote::reset),
        )
        .route("/v1/services", get(handlers::catalog::list_services))
        .route("/v1/projects", get(handlers::catalog::list_projects))
        .with_state(state.clone());

    // Admin routes requiring bearer-token authentication.
    let admin_routes = Router::new()
        .route("/v1/admin/leads", get(handlers::admin::list_leads))
        .route(
            "/v1/admin/leads/{id}",
            get(handlers::admin::get_lead).delete(handlers::admin::delete_lead),
        )
        .route(
            "/v1/admin/leads/{id}/status",
            patch(handlers::admin::update_lead_status),
        )
        .route(
            "/v1/admin/services",
            get(handlers::admin::list_services).post(handlers::admin::create_service),
        )
        .route(
            "/v1/admin/services/{id}",
            put(handlers::admin::update_service).delete(handlers::admin::delete_service),
        )
        .route(
            "/v1/admin/projects",
            get(handlers::admin::list_projects).post(handlers::admin::create_project),
        )
        .route(
            "/v1/admin/projects/{id}",
            put(handlers::admin::update_project).delete(handlers::admin::delete_project),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port, spawns the session sweeper, and
/// serves until the process is stopped or the listener fails.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), SunleadError> {
    let sweeper = spawn_session_sweeper(state.clone());
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SunleadError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    let served = axum::serve(listener, app)
        .await
        .map_err(|e| SunleadError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        });

    sweeper.abort();
    served
}
