// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token-protected admin endpoints for leads and catalog management.
//!
//! Everything here sits behind the bearer-token middleware; see
//! [`crate::auth`]. Catalog reads on this surface include inactive
//! rows, unlike their public counterparts.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use sunlead_core::{Lead, LeadId, LeadStatus, NewProject, NewService, Project, Service};

use crate::handlers::{ApiResult, not_found};
use crate::state::GatewayState;

/// Query parameters for `GET /v1/admin/leads`.
#[derive(Debug, Deserialize)]
pub struct LeadListQuery {
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

/// Request body for `PATCH /v1/admin/leads/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: LeadStatus,
}

/// `GET /v1/admin/leads` — newest first, optionally `?status=` filtered.
pub async fn list_leads(
    State(state): State<GatewayState>,
    Query(query): Query<LeadListQuery>,
) -> ApiResult<Json<Vec<Lead>>> {
    Ok(Json(state.leads.list_leads(query.status).await?))
}

/// `GET /v1/admin/leads/{id}`
pub async fn get_lead(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Lead>> {
    let lead = state
        .leads
        .get_lead(&LeadId(id.clone()))
        .await?
        .ok_or_else(|| not_found("lead", &id))?;
    Ok(Json(lead))
}

/// `PATCH /v1/admin/leads/{id}/status` — move a lead through the
/// pipeline; returns the updated record.
pub async fn update_lead_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Lead>> {
    let lead = state
        .leads
        .update_lead_status(&LeadId(id), body.status)
        .await?;
    Ok(Json(lead))
}

/// `DELETE /v1/admin/leads/{id}`
pub async fn delete_lead(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.leads.delete_lead(&LeadId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /v1/admin/services` — all services, inactive included.
pub async fn list_services(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Service>>> {
    Ok(Json(state.catalog.list_services(true).await?))
}

/// `POST /v1/admin/services`
pub async fn create_service(
    State(state): State<GatewayState>,
    Json(body): Json<NewService>,
) -> ApiResult<(StatusCode, Json<Service>)> {
    let service = state.catalog.create_service(&body).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// `PUT /v1/admin/services/{id}` — full replacement of the row's fields.
pub async fn update_service(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<NewService>,
) -> ApiResult<Json<Service>> {
    Ok(Json(state.catalog.update_service(&id, &body).await?))
}

/// `DELETE /v1/admin/services/{id}`
pub async fn delete_service(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_service(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /v1/admin/projects` — all projects, inactive included.
pub async fn list_projects(State(state): State<GatewayState>) -> ApiResult<Json<Vec<Project>>> {
    Ok(Json(state.catalog.list_projects(true).await?))
}

/// `POST /v1/admin/projects`
pub async fn create_project(
    State(state): State<GatewayState>,
    Json(body): Json<NewProject>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let project = state.catalog.create_project(&body).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// `PUT /v1/admin/projects/{id}` — full replacement of the row's fields.
pub async fn update_project(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<NewProject>,
) -> ApiResult<Json<Project>> {
    Ok(Json(state.catalog.update_project(&id, &body).await?))
}

/// `DELETE /v1/admin/projects/{id}`
pub async fn delete_project(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_project(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
