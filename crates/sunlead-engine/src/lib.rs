// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lead-capture step engine.
//!
//! One [`FlowEngine`] instance drives one visitor through an ordered set
//! of required fields, validating at each step boundary, and persists the
//! completed draft through a [`sunlead_core::LeadStore`]. The contact-page
//! wizard and the chatbot run the same engine with different
//! [`FlowDefinition`] tables, which guarantees identical business rules
//! across both entry points.

pub mod draft;
pub mod engine;
pub mod step;

pub use draft::LeadDraft;
pub use engine::{FlowEngine, FlowPhase, FlowSnapshot};
pub use step::{FlowDefinition, FlowKind, StepDefinition, CHATBOT_EMPTY_MESSAGE};
