// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chatbot session endpoints.
//!
//! Each session holds its own [`ChatSession`] behind a mutex; turns
//! within one session are serialized, sessions are independent.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use sunlead_chat::{BotReply, ChatSession};
use sunlead_core::ConversationTurn;

use crate::handlers::{ApiResult, not_found};
use crate::state::GatewayState;

/// One bot reply with its typing-delay hint, so clients can pace the
/// "typing…" indicator the same way the built-in shell does.
#[derive(Debug, Serialize)]
pub struct ReplyDto {
    pub text: String,
    pub typing_delay_ms: u64,
}

impl From<BotReply> for ReplyDto {
    fn from(reply: BotReply) -> Self {
        Self {
            text: reply.text,
            typing_delay_ms: reply.typing_delay.as_millis() as u64,
        }
    }
}

/// Response body for `POST /v1/chat/sessions`.
#[derive(Debug, Serialize)]
pub struct ChatSessionCreated {
    pub id: String,
    pub replies: Vec<ReplyDto>,
    pub quick_replies: Vec<String>,
}

/// Request body for `POST /v1/chat/sessions/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub text: String,
}

/// Response body for `POST /v1/chat/sessions/{id}/messages`.
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub replies: Vec<ReplyDto>,
}

/// Response body for `GET /v1/chat/sessions/{id}`.
#[derive(Debug, Serialize)]
pub struct ChatSessionView {
    pub id: String,
    pub collecting: bool,
    pub typing: bool,
    pub typing_delay_ms: u64,
    pub transcript: Vec<ConversationTurn>,
}

/// Total typing window for a burst of replies.
fn typing_window(replies: &[BotReply]) -> std::time::Duration {
    replies.iter().map(|r| r.typing_delay).sum()
}

/// `POST /v1/chat/sessions` — open a session and return the greeting.
pub async fn create_session(
    State(state): State<GatewayState>,
) -> (StatusCode, Json<ChatSessionCreated>) {
    let (id, entry) = state.open_chat_session();
    let mut entry = entry.lock().await;
    let replies: Vec<BotReply> = entry.session.greet().into_iter().collect();
    entry.start_typing(typing_window(&replies));

    let body = ChatSessionCreated {
        id,
        replies: replies.into_iter().map(ReplyDto::from).collect(),
        quick_replies: ChatSession::quick_replies()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };
    (StatusCode::CREATED, Json(body))
}

/// `POST /v1/chat/sessions/{id}/messages` — send a visitor message and
/// return the bot's replies.
pub async fn post_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<ChatMessageRequest>,
) -> ApiResult<Json<ChatMessageResponse>> {
    let entry = state
        .chat_session(&id)
        .ok_or_else(|| not_found("chat session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();

    let replies = entry.session.handle_input(&body.text).await;
    entry.start_typing(typing_window(&replies));
    Ok(Json(ChatMessageResponse {
        replies: replies.into_iter().map(ReplyDto::from).collect(),
    }))
}

/// `GET /v1/chat/sessions/{id}` — current mode and full transcript.
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ChatSessionView>> {
    let entry = state
        .chat_session(&id)
        .ok_or_else(|| not_found("chat session", &id))?;
    let mut entry = entry.lock().await;
    entry.touch();

    Ok(Json(ChatSessionView {
        id,
        collecting: entry.session.is_collecting(),
        typing: entry.is_typing(),
        typing_delay_ms: entry.session.typing_delay().as_millis() as u64,
        transcript: entry.session.transcript().to_vec(),
    }))
}

/// `DELETE /v1/chat/sessions/{id}` — drop the session, cancelling its
/// pending typing timer and discarding any in-progress draft.
pub async fn delete_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.chat_sessions.remove(&id).is_none() {
        return Err(not_found("chat session", &id));
    }
    Ok(StatusCode::NO_CONTENT)
}
