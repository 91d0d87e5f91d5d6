// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the gateway HTTP API.
//!
//! Each test builds a router over in-memory stores and drives it with
//! `tower::ServiceExt::oneshot`, so no socket is bound. Tests are
//! independent and order-insensitive.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use tower::ServiceExt;

use sunlead_config::SunleadConfig;
use sunlead_core::{CatalogStore, LeadSource, LeadStore, NewLead, NewProject, NewService, StoreHealth};
use sunlead_gateway::{GatewayState, build_router};
use sunlead_test_utils::{MemoryCatalogStore, MemoryLeadStore};

const ADMIN_TOKEN: &str = "test-admin-token";

fn test_state(
    admin_token: Option<&str>,
) -> (GatewayState, Arc<MemoryLeadStore>, Arc<MemoryCatalogStore>) {
    let leads = Arc::new(MemoryLeadStore::new());
    let catalog = Arc::new(MemoryCatalogStore::new());
    let mut config = SunleadConfig::default();
    config.gateway.admin_token = admin_token.map(str::to_string);
    let state = GatewayState::new(leads.clone(), catalog.clone(), &config);
    (state, leads, catalog)
}

/// Sends one request and returns the status plus the parsed JSON body
/// (`Null` when the response has no body, e.g. 204).
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Method::GET, uri, None, None).await
}

async fn post(
    app: &Router,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    send(app, Method::POST, uri, body, None).await
}

/// One visitor message into a chat session.
async fn say(app: &Router, id: &str, text: &str) -> (StatusCode, serde_json::Value) {
    post(
        app,
        &format!("/v1/chat/sessions/{id}/messages"),
        Some(serde_json::json!({ "text": text })),
    )
    .await
}

/// One field write into a quote session.
async fn set_field(
    app: &Router,
    id: &str,
    field: &str,
    value: &str,
) -> (StatusCode, serde_json::Value) {
    post(
        app,
        &format!("/v1/quote/sessions/{id}/fields"),
        Some(serde_json::json!({ "field": field, "value": value })),
    )
    .await
}

fn sample_lead() -> NewLead {
    NewLead {
        name: "Asha".into(),
        phone: "9999999999".into(),
        email: "asha@example.com".into(),
        property_type: Some("Residential".into()),
        system_size: Some("Small (1-5 kW)".into()),
        budget: None,
        timeline: None,
        roof_type: None,
        message: None,
        source: LeadSource::ContactForm,
    }
}

// ---- Health ----

#[tokio::test]
async fn test_health_reports_store_status() {
    let (state, leads, _) = test_state(None);
    let app = build_router(state);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "healthy");
    assert!(!body["version"].as_str().unwrap().is_empty());

    leads.set_health(StoreHealth::Unhealthy("disk full".to_string()));
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unhealthy");
    assert!(body["store"].as_str().unwrap().contains("disk full"));
}

// ---- Chat sessions ----

#[tokio::test]
async fn test_chat_session_greets_on_create() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (status, body) = post(&app, "/v1/chat/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert!(
        body["replies"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Solar Assistant")
    );
    assert!(body["replies"][0]["typing_delay_ms"].as_u64().unwrap() > 0);
    assert!(!body["quick_replies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_full_flow_submits_lead() {
    let (state, leads, _) = test_state(None);
    let app = build_router(state);

    let (_, created) = post(&app, "/v1/chat/sessions", None).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = say(&app, &id, "I want a quote").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["replies"][0]["text"]
            .as_str()
            .unwrap()
            .contains("what's your name?")
    );

    // Session is now collecting.
    let (_, view) = get(&app, &format!("/v1/chat/sessions/{id}")).await;
    assert_eq!(view["collecting"], true);

    say(&app, &id, "Ravi").await;
    say(&app, &id, "ravi@example.com").await;
    say(&app, &id, "8888888888").await;
    say(&app, &id, "2").await;
    say(&app, &id, "Medium (5-20 kW)").await;
    let (status, body) = say(&app, &id, "none").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body["replies"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Thank you, Ravi!")
    );

    let stored = leads.created();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Ravi");
    assert_eq!(stored[0].property_type.as_deref(), Some("Commercial"));
    assert_eq!(stored[0].source, LeadSource::Chatbot);

    // Back in FAQ mode with the whole exchange on the transcript.
    let (_, view) = get(&app, &format!("/v1/chat/sessions/{id}")).await;
    assert_eq!(view["collecting"], false);
    let transcript = view["transcript"].as_array().unwrap();
    assert_eq!(transcript.len(), 15);
    assert_eq!(transcript[0]["role"], "bot");
}

#[tokio::test(start_paused = true)]
async fn test_typing_state_tracks_the_reply_window() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (_, created) = post(&app, "/v1/chat/sessions", None).await;
    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/v1/chat/sessions/{id}");

    // The greeting opens a typing window.
    let (_, view) = get(&app, &uri).await;
    assert_eq!(view["typing"], true);

    // Past the default 500ms greeting delay the window is closed.
    tokio::time::advance(std::time::Duration::from_millis(600)).await;
    let (_, view) = get(&app, &uri).await;
    assert_eq!(view["typing"], false);

    // Each message reopens it for the new replies.
    say(&app, &id, "what are the savings?").await;
    let (_, view) = get(&app, &uri).await;
    assert_eq!(view["typing"], true);
}

#[tokio::test]
async fn test_chat_delete_drops_session() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (_, created) = post(&app, "/v1/chat/sessions", None).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/v1/chat/sessions/{id}");

    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("chat session not found")
    );
}

#[tokio::test]
async fn test_chat_unknown_session_is_404() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (status, _) = say(&app, "no-such-id", "hello").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---- Quote wizard sessions ----

#[tokio::test]
async fn test_quote_wizard_full_flow() {
    let (state, leads, _) = test_state(None);
    let app = build_router(state);

    let (status, created) = post(&app, "/v1/quote/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["snapshot"]["step_id"], "personal_info");
    assert_eq!(created["snapshot"]["total_steps"], 4);

    // The create response advertises the form's pick lists.
    let choices = created["choices"].as_array().unwrap();
    assert_eq!(choices.len(), 5);
    let timeline = choices
        .iter()
        .find(|c| c["field"] == "timeline")
        .expect("timeline pick list");
    assert_eq!(timeline["options"][0], "Immediate");
    assert_eq!(timeline["options"][3], "Just Exploring");

    let advance_uri = format!("/v1/quote/sessions/{id}/advance");

    set_field(&app, &id, "name", "Asha").await;
    set_field(&app, &id, "phone", "9999999999").await;
    let (_, snapshot) = set_field(&app, &id, "email", "asha@example.com").await;
    assert_eq!(snapshot["draft"]["name"], "Asha");

    let (status, snapshot) = post(&app, &advance_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["step_id"], "project_details");

    set_field(&app, &id, "property_type", "Residential").await;
    set_field(&app, &id, "system_size", "Small (1-5 kW)").await;
    let (_, snapshot) = post(&app, &advance_uri, None).await;
    assert_eq!(snapshot["step_id"], "preferences");

    set_field(&app, &id, "budget", "Rs 1-2 Lakh").await;
    set_field(&app, &id, "timeline", "Within a month").await;
    let (_, snapshot) = post(&app, &advance_uri, None).await;
    assert_eq!(snapshot["step_id"], "review");

    let (status, snapshot) = post(&app, &format!("/v1/quote/sessions/{id}/submit"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["submitted_ok"], true);
    assert_eq!(snapshot["submitted_name"], "Asha");

    let stored = leads.created();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].source, LeadSource::ContactForm);
}

#[tokio::test]
async fn test_quote_retreat_keeps_entered_values() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (_, created) = post(&app, "/v1/quote/sessions", None).await;
    let id = created["id"].as_str().unwrap().to_string();

    set_field(&app, &id, "name", "Asha").await;
    set_field(&app, &id, "phone", "9999999999").await;
    set_field(&app, &id, "email", "asha@example.com").await;
    post(&app, &format!("/v1/quote/sessions/{id}/advance"), None).await;

    let (status, snapshot) =
        post(&app, &format!("/v1/quote/sessions/{id}/retreat"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["step_id"], "personal_info");
    assert_eq!(snapshot["draft"]["name"], "Asha");
}

#[tokio::test]
async fn test_quote_advance_with_blank_fields_is_422() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (_, created) = post(&app, "/v1/quote/sessions", None).await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = post(&app, &format!("/v1/quote/sessions/{id}/advance"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "name, phone, email required");

    // Still on the first step.
    let (_, snapshot) = get(&app, &format!("/v1/quote/sessions/{id}")).await;
    assert_eq!(snapshot["step_id"], "personal_info");
}

#[tokio::test]
async fn test_quote_store_failure_is_502_and_draft_survives() {
    let (state, leads, _) = test_state(None);
    let app = build_router(state);

    let (_, created) = post(&app, "/v1/quote/sessions", None).await;
    let id = created["id"].as_str().unwrap().to_string();

    for (field, value) in [
        ("name", "Asha"),
        ("phone", "9999999999"),
        ("email", "asha@example.com"),
        ("property_type", "Residential"),
        ("system_size", "Small (1-5 kW)"),
        ("budget", "Rs 1-2 Lakh"),
        ("timeline", "Within a month"),
    ] {
        set_field(&app, &id, field, value).await;
    }
    for _ in 0..3 {
        post(&app, &format!("/v1/quote/sessions/{id}/advance"), None).await;
    }

    leads.push_failure("lead table unavailable.");
    let submit_uri = format!("/v1/quote/sessions/{id}/submit");
    let (status, body) = post(&app, &submit_uri, None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "lead table unavailable.");
    assert_eq!(leads.created_count(), 0);

    // Draft and error survive on the session for the retry.
    let (_, snapshot) = get(&app, &format!("/v1/quote/sessions/{id}")).await;
    assert_eq!(snapshot["last_error"], "lead table unavailable.");
    assert_eq!(snapshot["draft"]["name"], "Asha");

    let (status, snapshot) = post(&app, &submit_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["submitted_ok"], true);
    assert_eq!(leads.created_count(), 1);
}

#[tokio::test]
async fn test_quote_unknown_session_is_404() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (status, _) = get(&app, "/v1/quote/sessions/no-such-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---- Public catalog ----

#[tokio::test]
async fn test_services_lists_active_only_in_display_order() {
    let (state, _, catalog) = test_state(None);

    for (title, order, active) in [
        ("Maintenance", 2, true),
        ("Rooftop Installation", 1, true),
        ("Legacy Audit", 0, false),
    ] {
        let service: NewService = serde_json::from_value(serde_json::json!({
            "title": title,
            "description": "d",
            "display_order": order,
            "is_active": active,
        }))
        .unwrap();
        catalog.create_service(&service).await.unwrap();
    }

    let app = build_router(state);
    let (status, body) = get(&app, "/v1/services").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rooftop Installation", "Maintenance"]);
}

#[tokio::test]
async fn test_projects_endpoint_serves_active_rows() {
    let (state, _, catalog) = test_state(None);
    let project: NewProject = serde_json::from_value(serde_json::json!({
        "title": "Jaipur 10kW Rooftop",
        "category": "residential",
        "location": "Jaipur",
        "capacity": "10 kW",
        "description": "d",
    }))
    .unwrap();
    catalog.create_project(&project).await.unwrap();

    let app = build_router(state);
    let (status, body) = get(&app, "/v1/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Jaipur 10kW Rooftop");
}

// ---- Admin auth ----

#[tokio::test]
async fn test_admin_is_fail_closed_without_configured_token() {
    let (state, _, _) = test_state(None);
    let app = build_router(state);

    let (status, _) = get(&app, "/v1/admin/leads").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Even a presented token is rejected when none is configured.
    let (status, _) = send(&app, Method::GET, "/v1/admin/leads", None, Some("anything")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_rejects_missing_or_wrong_token() {
    let (state, _, _) = test_state(Some(ADMIN_TOKEN));
    let app = build_router(state);

    let (status, _) = get(&app, "/v1/admin/leads").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/v1/admin/leads", None, Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::GET,
        "/v1/admin/leads",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_auth_does_not_gate_public_routes() {
    let (state, _, _) = test_state(Some(ADMIN_TOKEN));
    let app = build_router(state);

    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post(&app, "/v1/chat/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
}

// ---- Admin leads ----

#[tokio::test]
async fn test_admin_lead_lifecycle() {
    let (state, leads, _) = test_state(Some(ADMIN_TOKEN));
    let lead = leads.create_lead(&sample_lead()).await.unwrap();
    let app = build_router(state);

    let (status, body) = send(
        &app,
        Method::GET,
        "/v1/admin/leads",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let lead_uri = format!("/v1/admin/leads/{}", lead.id);
    let (status, body) = send(&app, Method::GET, &lead_uri, None, Some(ADMIN_TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Asha");
    assert_eq!(body["status"], "new");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("{lead_uri}/status"),
        Some(serde_json::json!({ "status": "contacted" })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "contacted");

    // The status filter sees the transition.
    let (_, body) = send(
        &app,
        Method::GET,
        "/v1/admin/leads?status=contacted",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = send(
        &app,
        Method::GET,
        "/v1/admin/leads?status=new",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (status, _) = send(&app, Method::DELETE, &lead_uri, None, Some(ADMIN_TOKEN)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &lead_uri, None, Some(ADMIN_TOKEN)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_lead_status_filter_rejects_unknown_value() {
    let (state, _, _) = test_state(Some(ADMIN_TOKEN));
    let app = build_router(state);

    let (status, _) = send(
        &app,
        Method::GET,
        "/v1/admin/leads?status=bogus",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---- Admin catalog ----

#[tokio::test]
async fn test_admin_catalog_crud() {
    let (state, _, _) = test_state(Some(ADMIN_TOKEN));
    let app = build_router(state);

    let (status, created) = send(
        &app,
        Method::POST,
        "/v1/admin/services",
        Some(serde_json::json!({
            "title": "Rooftop Installation",
            "description": "Residential and commercial rooftops",
            "features": ["Site survey", "Subsidy paperwork"],
            "timeline": "2-3 weeks",
            "is_active": false,
        })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = created["id"].as_str().unwrap().to_string();

    // Inactive rows are invisible publicly but listed on the admin surface.
    let (_, body) = get(&app, "/v1/services").await;
    assert_eq!(body.as_array().unwrap().len(), 0);
    let (_, body) = send(
        &app,
        Method::GET,
        "/v1/admin/services",
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/v1/admin/services/{service_id}"),
        Some(serde_json::json!({
            "title": "Rooftop Installation",
            "description": "Residential and commercial rooftops",
            "timeline": "2-3 weeks",
            "is_active": true,
        })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], true);

    let (_, body) = get(&app, "/v1/services").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/v1/admin/services/{service_id}"),
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/v1/admin/services/{service_id}"),
        None,
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_project_create_and_update() {
    let (state, _, _) = test_state(Some(ADMIN_TOKEN));
    let app = build_router(state);

    let (status, created) = send(
        &app,
        Method::POST,
        "/v1/admin/projects",
        Some(serde_json::json!({
            "title": "Jaipur 10kW Rooftop",
            "category": "residential",
            "location": "Jaipur",
            "capacity": "10 kW",
            "description": "Completed install",
            "panel_count": 24,
        })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["panel_count"], 24);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/v1/admin/projects/{project_id}"),
        Some(serde_json::json!({
            "title": "Jaipur 12kW Rooftop",
            "category": "residential",
            "location": "Jaipur",
            "capacity": "12 kW",
            "description": "Expanded install",
        })),
        Some(ADMIN_TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Jaipur 12kW Rooftop");
    assert_eq!(updated["capacity"], "12 kW");
}

// ---- Session expiry ----

#[tokio::test(start_paused = true)]
async fn test_swept_session_is_gone_from_the_api() {
    let (state, _, _) = test_state(None);
    let app = build_router(state.clone());

    let (_, created) = post(&app, "/v1/chat/sessions", None).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/v1/chat/sessions/{id}");

    // Idle past the TTL (default 1800s), then sweep.
    tokio::time::advance(std::time::Duration::from_secs(1801)).await;
    let (dropped_chat, _) = state.sweep_expired();
    assert_eq!(dropped_chat, 1);

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
