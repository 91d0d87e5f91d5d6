// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Liveness endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use sunlead_core::StoreHealth;

use crate::state::GatewayState;

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub store: String,
}

/// `GET /health` — unauthenticated liveness probe.
///
/// Reports overall status, the crate version, process uptime, and the
/// lead store's own health. A degraded store still counts as `ok`; only
/// an unhealthy or unreachable store flips the status.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let (status, store) = match state.leads.health_check().await {
        Ok(StoreHealth::Healthy) => ("ok", "healthy".to_string()),
        Ok(StoreHealth::Degraded(detail)) => ("ok", format!("degraded: {detail}")),
        Ok(StoreHealth::Unhealthy(detail)) => ("unhealthy", format!("unhealthy: {detail}")),
        Err(err) => ("unhealthy", format!("unreachable: {err}")),
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        store,
    })
}
