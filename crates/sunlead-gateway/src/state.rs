// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared state for axum request handlers.
//!
//! Sessions live in [`DashMap`]s keyed by generated ids. Each entry is an
//! `Arc<Mutex<..>>` so a handler can hold one session across the engine's
//! store await without blocking unrelated sessions. Idle entries are
//! reclaimed by the TTL sweeper; dropping an entry drops its draft and
//! cancels its typing timer, which is the teardown contract for abandoned
//! sessions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use sunlead_chat::{ChatSession, TypingTimer};
use sunlead_config::{ChatConfig, SiteConfig, SunleadConfig};
use sunlead_core::{CatalogStore, LeadStore};
use sunlead_engine::{FlowDefinition, FlowEngine};

use crate::auth::AuthConfig;

/// How often the background sweeper scans for expired sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// One conversational session plus its idle clock and typing window.
pub struct ChatSessionEntry {
    pub session: ChatSession,
    pub last_activity: Instant,
    typing: Arc<AtomicBool>,
    pending: Option<TypingTimer>,
}

impl ChatSessionEntry {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            last_activity: Instant::now(),
            typing: Arc::new(AtomicBool::new(false)),
            pending: None,
        }
    }

    /// Restarts the idle clock. Called on every request touching the session.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Marks the bot as typing for `window`. Replacing the previous timer
    /// cancels it, and dropping the entry cancels the last one, so the flag
    /// never outlives the session.
    pub fn start_typing(&mut self, window: Duration) {
        if window.is_zero() {
            return;
        }
        self.typing.store(true, Ordering::SeqCst);
        let flag = self.typing.clone();
        self.pending = Some(TypingTimer::schedule(window, move || {
            flag.store(false, Ordering::SeqCst);
        }));
    }

    /// Whether a typing window started by [`start_typing`] is still open.
    ///
    /// [`start_typing`]: ChatSessionEntry::start_typing
    pub fn is_typing(&self) -> bool {
        self.typing.load(Ordering::SeqCst)
    }
}

/// One wizard session plus its idle clock.
pub struct QuoteSessionEntry {
    pub engine: FlowEngine,
    pub last_activity: Instant,
}

impl QuoteSessionEntry {
    pub fn new(engine: FlowEngine) -> Self {
        Self {
            engine,
            last_activity: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Lead persistence, shared with every session's engine.
    pub leads: Arc<dyn LeadStore + Send + Sync>,
    /// Catalog persistence for the public and admin endpoints.
    pub catalog: Arc<dyn CatalogStore + Send + Sync>,
    /// Live conversational sessions keyed by id.
    pub chat_sessions: Arc<DashMap<String, Arc<Mutex<ChatSessionEntry>>>>,
    /// Live wizard sessions keyed by id.
    pub quote_sessions: Arc<DashMap<String, Arc<Mutex<QuoteSessionEntry>>>>,
    /// Business identity interpolated into chatbot replies.
    pub site: SiteConfig,
    /// Chatbot presentation settings.
    pub chat: ChatConfig,
    /// Authentication configuration for the admin routes.
    pub auth: AuthConfig,
    /// Inactivity window after which a session is swept.
    pub session_ttl: Duration,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    pub fn new(
        leads: Arc<dyn LeadStore + Send + Sync>,
        catalog: Arc<dyn CatalogStore + Send + Sync>,
        config: &SunleadConfig,
    ) -> Self {
        Self {
            leads,
            catalog,
            chat_sessions: Arc::new(DashMap::new()),
            quote_sessions: Arc::new(DashMap::new()),
            site: config.site.clone(),
            chat: config.chat.clone(),
            auth: AuthConfig {
                admin_token: config.gateway.admin_token.clone(),
            },
            session_ttl: Duration::from_secs(config.gateway.session_ttl_secs),
            start_time: std::time::Instant::now(),
        }
    }

    /// Creates and registers a new conversational session.
    pub fn open_chat_session(&self) -> (String, Arc<Mutex<ChatSessionEntry>>) {
        let id = uuid::Uuid::new_v4().to_string();
        let session = ChatSession::new(self.leads.clone(), self.site.clone(), &self.chat);
        let entry = Arc::new(Mutex::new(ChatSessionEntry::new(session)));
        self.chat_sessions.insert(id.clone(), entry.clone());
        debug!(session_id = %id, "chat session opened");
        (id, entry)
    }

    /// Creates and registers a new wizard session.
    pub fn open_quote_session(&self) -> (String, Arc<Mutex<QuoteSessionEntry>>) {
        let id = uuid::Uuid::new_v4().to_string();
        let engine = FlowEngine::new(FlowDefinition::wizard(), self.leads.clone());
        let entry = Arc::new(Mutex::new(QuoteSessionEntry::new(engine)));
        self.quote_sessions.insert(id.clone(), entry.clone());
        debug!(session_id = %id, "quote session opened");
        (id, entry)
    }

    /// Looks up a conversational session. Clones the entry handle out of
    /// the map so no shard guard is held across an await.
    pub fn chat_session(&self, id: &str) -> Option<Arc<Mutex<ChatSessionEntry>>> {
        self.chat_sessions.get(id).map(|e| Arc::clone(e.value()))
    }

    /// Looks up a wizard session.
    pub fn quote_session(&self, id: &str) -> Option<Arc<Mutex<QuoteSessionEntry>>> {
        self.quote_sessions.get(id).map(|e| Arc::clone(e.value()))
    }

    /// Drops every session idle longer than the TTL. A session locked by a
    /// request right now is in use and survives the sweep. Returns the
    /// number of dropped (chat, quote) sessions.
    pub fn sweep_expired(&self) -> (usize, usize) {
        let ttl = self.session_ttl;
        let now = Instant::now();

        let chat_before = self.chat_sessions.len();
        self.chat_sessions.retain(|_, entry| match entry.try_lock() {
            Ok(guard) => now.duration_since(guard.last_activity) < ttl,
            Err(_) => true,
        });

        let quote_before = self.quote_sessions.len();
        self.quote_sessions.retain(|_, entry| match entry.try_lock() {
            Ok(guard) => now.duration_since(guard.last_activity) < ttl,
            Err(_) => true,
        });

        (
            chat_before - self.chat_sessions.len(),
            quote_before - self.quote_sessions.len(),
        )
    }
}

/// Spawns the background task that reclaims idle sessions.
pub fn spawn_session_sweeper(state: GatewayState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        // Skip the first immediate tick.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let (chat, quote) = state.sweep_expired();
            if chat + quote > 0 {
                debug!(chat, quote, "swept expired sessions");
            }
        }
    })
}
