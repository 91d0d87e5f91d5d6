// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public read-only catalog endpoints.

use axum::Json;
use axum::extract::State;

use sunlead_core::{Project, Service};

use crate::handlers::ApiResult;
use crate::state::GatewayState;

/// `GET /v1/services` — active service offerings in display order.
pub async fn list_services(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Service>>> {
    Ok(Json(state.catalog.list_services(false).await?))
}

/// `GET /v1/projects` — active completed projects in display order.
pub async fn list_projects(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.catalog.list_projects(false).await?))
}
