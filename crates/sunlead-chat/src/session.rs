// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-visitor chat session: FAQ answers plus the conversational capture flow.
//!
//! Each session runs in one of two modes: FAQ mode answers informational
//! questions via keyword routing, and collection mode feeds every user
//! message to the step engine as the value for the field currently being
//! asked for. The transcript is append-only; replies carry a presentation
//! delay and never block field collection.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use sunlead_config::{ChatConfig, SiteConfig};
use sunlead_core::{ConversationTurn, FieldId, LeadStore};
use sunlead_engine::{FlowDefinition, FlowEngine, FlowPhase};

use crate::normalize::normalize_property_type;
use crate::replies;
use crate::topics::{self, Topic};

/// Which of the two session modes is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Answering informational questions by keyword.
    Faq,
    /// Feeding user messages into the capture flow, one field per turn.
    Collecting,
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatMode::Faq => write!(f, "faq"),
            ChatMode::Collecting => write!(f, "collecting"),
        }
    }
}

/// One bot message plus how long the typing indicator should show before
/// it becomes visible. The delay is presentation-only.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub text: String,
    pub typing_delay: Duration,
}

/// Drives one visitor's chat: greeting, FAQ answers, and the quote
/// collection flow backed by a [`FlowEngine`].
pub struct ChatSession {
    mode: ChatMode,
    engine: FlowEngine,
    transcript: Vec<ConversationTurn>,
    site: SiteConfig,
    typing_delay: Duration,
    greeting_delay: Duration,
}

impl ChatSession {
    /// Creates a session in FAQ mode with an empty transcript.
    pub fn new(
        store: Arc<dyn LeadStore + Send + Sync>,
        site: SiteConfig,
        chat: &ChatConfig,
    ) -> Self {
        Self {
            mode: ChatMode::Faq,
            engine: FlowEngine::new(FlowDefinition::conversation(), store),
            transcript: Vec::new(),
            site,
            typing_delay: Duration::from_millis(chat.typing_delay_ms),
            greeting_delay: Duration::from_millis(chat.greeting_delay_ms),
        }
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn is_collecting(&self) -> bool {
        self.mode == ChatMode::Collecting
    }

    /// The configured per-reply typing delay, for shells that render
    /// their own indicator.
    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    /// The append-only transcript, oldest turn first.
    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// Quick-reply phrases to offer next to the input box. Selecting one
    /// is the same as typing it.
    pub fn quick_replies() -> &'static [&'static str] {
        replies::QUICK_REPLIES
    }

    /// Opening greeting, delivered once per session. Returns `None` when
    /// the transcript already has turns, so reopening the widget does not
    /// greet twice.
    pub fn greet(&mut self) -> Option<BotReply> {
        if !self.transcript.is_empty() {
            return None;
        }
        let text = replies::greeting();
        self.transcript.push(ConversationTurn::bot(&text));
        Some(BotReply {
            text,
            typing_delay: self.greeting_delay,
        })
    }

    /// Consumes one line of user input and produces the bot's replies.
    ///
    /// Blank input is dropped without a turn or a reply. In FAQ mode the
    /// text is routed by keyword; in collection mode it is the value for
    /// the field the engine is currently asking for. The final collection
    /// turn submits the lead, so this is the only method that may await.
    pub async fn handle_input(&mut self, input: &str) -> Vec<BotReply> {
        let text = input.trim();
        if text.is_empty() {
            return Vec::new();
        }
        self.transcript.push(ConversationTurn::user(text));

        match self.mode {
            ChatMode::Faq => self.handle_faq(text),
            ChatMode::Collecting => self.handle_collection(text).await,
        }
    }

    fn handle_faq(&mut self, text: &str) -> Vec<BotReply> {
        match topics::route(text) {
            Some(Topic::QuoteIntake) => {
                info!(mode = %self.mode, "quote keyword matched, entering collection");
                self.mode = ChatMode::Collecting;
                self.engine.reset();
                let prompt = replies::field_prompt(FieldId::Name, self.engine.draft());
                vec![self.bot_reply(prompt)]
            }
            Some(topic) => {
                debug!(%topic, "faq topic matched");
                let reply = replies::topic_reply(topic, &self.site);
                vec![self.bot_reply(reply)]
            }
            None => {
                let menu = replies::default_menu();
                vec![self.bot_reply(menu)]
            }
        }
    }

    async fn handle_collection(&mut self, text: &str) -> Vec<BotReply> {
        let Some(field) = self.engine.current_step().collected_field() else {
            // The conversational step table always collects something;
            // fall back to the menu rather than wedge the conversation.
            warn!(step = self.engine.current_step().id, "step collects no field");
            self.mode = ChatMode::Faq;
            let menu = replies::default_menu();
            return vec![self.bot_reply(menu)];
        };

        let value = if field == FieldId::PropertyType {
            normalize_property_type(text)
        } else {
            text.to_string()
        };

        if self.engine.is_final_step() {
            // The literal "none" (case-sensitive, matching the prompt's
            // hint) means the visitor has nothing to add.
            let message = if value == "none" { String::new() } else { value };
            self.engine.set_field(field, message);
            return self.submit().await;
        }

        self.engine.set_field(field, value);
        match self.engine.advance() {
            Ok(()) => {
                let Some(next) = self.engine.current_step().collected_field() else {
                    warn!(step = self.engine.current_step().id, "step collects no field");
                    self.mode = ChatMode::Faq;
                    let menu = replies::default_menu();
                    return vec![self.bot_reply(menu)];
                };
                let prompt = replies::field_prompt(next, self.engine.draft());
                vec![self.bot_reply(prompt)]
            }
            Err(err) => {
                // Blank input never reaches here, but if a gate rejects a
                // value we re-ask for the same field instead of advancing.
                warn!(error = %err, step = self.engine.current_step().id, "input rejected");
                let prompt = replies::field_prompt(field, self.engine.draft());
                vec![self.bot_reply(prompt)]
            }
        }
    }

    async fn submit(&mut self) -> Vec<BotReply> {
        match self.engine.submit().await {
            Ok(()) => {
                let name = match self.engine.phase() {
                    FlowPhase::Submitted { name } => name.clone(),
                    FlowPhase::Collecting => String::new(),
                };
                self.engine.reset();
                self.mode = ChatMode::Faq;
                let text = replies::submit_success(&name);
                vec![self.bot_reply(text)]
            }
            Err(err) => {
                // Stay in collection mode on the final step: the next
                // message is treated as the requirements text again and
                // re-submits, so nothing the visitor typed is lost.
                let text = replies::submit_failure(&err.user_message(), &self.site);
                vec![self.bot_reply(text)]
            }
        }
    }

    fn bot_reply(&mut self, text: String) -> BotReply {
        self.transcript.push(ConversationTurn::bot(&text));
        BotReply {
            text,
            typing_delay: self.typing_delay,
        }
    }
}
