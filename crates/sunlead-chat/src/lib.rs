// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational layer for the Sunlead chatbot.
//!
//! Turns one line of free text into either a canned informational reply
//! (keyword-routed FAQ mode) or a field value for the capture flow
//! (collection mode). The deterministic routing is the whole design:
//! no language model, no network call, same answer every time.

pub mod normalize;
pub mod replies;
pub mod session;
pub mod topics;
pub mod typing;

pub use normalize::normalize_property_type;
pub use session::{BotReply, ChatMode, ChatSession};
pub use topics::{route, Topic};
pub use typing::TypingTimer;
