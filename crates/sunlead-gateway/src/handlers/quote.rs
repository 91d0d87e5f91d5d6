// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quote-wizard session endpoints.
//!
//! A quote session is a [`FlowEngine`] running the contact-page wizard.
//! Every mutation returns the fresh [`FlowSnapshot`] so clients can
//! render without a follow-up read; failed operations return the error
//! body instead, and the state (draft, `last_error`) stays on the
//! session for the next read.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use sunlead_core::FieldId;
use sunlead_engine::{FlowDefinition, FlowSnapshot};

use crate::handlers::{ApiResult, not_found};
use crate::state::GatewayState;

/// Pick-list options for one wizard field, so the form can render its
/// selects without hardcoding the labels.
#[derive(Debug, Serialize)]
pub struct FieldChoices {
    pub field: FieldId,
    pub options: Vec<String>,
}

/// Response body for `POST /v1/quote/sessions`.
#[derive(Debug, Serialize)]
pub struct QuoteSessionCreated {
    pub id: String,
    pub snapshot: FlowSnapshot,
    pub choices: Vec<FieldChoices>,
}

/// The flow's pick lists in table order.
fn field_choices(flow: &FlowDefinition) -> Vec<FieldChoices> {
    flow.choice_lists
        .iter()
        .map(|&(field, options)| FieldChoices {
            field,
            options: options.iter().map(|o| o.to_string()).collect(),
        })
        .collect()
}

/// Request body for `POST /v1/quote/sessions/{id}/fields`.
#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub field: FieldId,
    pub value: String,
}

/// `POST /v1/quote/sessions` — open a wizard session at step one.
pub async fn create_session(
    State(state): State<GatewayState>,
) -> (StatusCode, Json<QuoteSessionCreated>) {
    let (id, entry) = state.open_quote_session();
    let entry = entry.lock().await;
    let body = QuoteSessionCreated {
        id,
        snapshot: entry.engine.snapshot(),
        choices: field_choices(entry.engine.flow()),
    };
    (StatusCode::CREATED, Json(body))
}

/// `GET /v1/quote/sessions/{id}` — current snapshot.
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FlowSnapshot>> {
    let entry = state
        .quote_session(&id)
        .ok_or_else(|| not_found("quote session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();
    Ok(Json(entry.engine.snapshot()))
}

/// `POST /v1/quote/sessions/{id}/fields` — record one field value.
///
/// Never validates; gates run on advance and submit.
pub async fn set_field(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<SetFieldRequest>,
) -> ApiResult<Json<FlowSnapshot>> {
    let entry = state
        .quote_session(&id)
        .ok_or_else(|| not_found("quote session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();
    entry.engine.set_field(body.field, body.value);
    Ok(Json(entry.engine.snapshot()))
}

/// `POST /v1/quote/sessions/{id}/advance` — validate the current step
/// and move forward. A failed gate comes back as 422 and the session
/// stays on the same step.
pub async fn advance(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FlowSnapshot>> {
    let entry = state
        .quote_session(&id)
        .ok_or_else(|| not_found("quote session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();
    entry.engine.advance()?;
    Ok(Json(entry.engine.snapshot()))
}

/// `POST /v1/quote/sessions/{id}/retreat` — step back without
/// validating; entered values are kept.
pub async fn retreat(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FlowSnapshot>> {
    let entry = state
        .quote_session(&id)
        .ok_or_else(|| not_found("quote session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();
    entry.engine.retreat();
    Ok(Json(entry.engine.snapshot()))
}

/// `POST /v1/quote/sessions/{id}/submit` — persist the draft.
///
/// A store failure comes back as 502 with the store's message; the
/// draft survives on the session so the client can retry.
pub async fn submit(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FlowSnapshot>> {
    let entry = state
        .quote_session(&id)
        .ok_or_else(|| not_found("quote session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();
    entry.engine.submit().await?;
    Ok(Json(entry.engine.snapshot()))
}

/// `POST /v1/quote/sessions/{id}/reset` — back to step one with an
/// empty draft.
pub async fn reset(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FlowSnapshot>> {
    let entry = state
        .quote_session(&id)
        .ok_or_else(|| not_found("quote session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();
    entry.engine.reset();
    Ok(Json(entry.engine.snapshot()))
}
