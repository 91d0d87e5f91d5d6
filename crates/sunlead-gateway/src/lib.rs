// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway exposing the lead-capture flows over REST.
//!
//! The gateway hosts server-side [`sunlead_chat::ChatSession`] and
//! [`sunlead_engine::FlowEngine`] instances keyed by opaque session ids,
//! so a website front end can drive the same flows the terminal shell
//! does. Public routes cover the chatbot, the quote wizard, and catalog
//! reads; the admin surface for leads and catalog management sits
//! behind a bearer token.

pub mod auth;
pub mod handlers;
pub mod server;
pub mod state;

pub use auth::AuthConfig;
pub use server::{ServerConfig, build_router, start_server};
pub use state::{GatewayState, spawn_session_sweeper};
