// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The step engine driving one capture flow instance.
//!
//! One engine owns one draft plus the step cursor, and is the only thing
//! allowed to mutate either. Validation runs at step boundaries only, so
//! partially-typed input never produces spurious errors. The engine's sole
//! suspension point is the store call inside [`FlowEngine::submit`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sunlead_core::{FieldId, LeadStore, SunleadError};

use crate::draft::LeadDraft;
use crate::step::{FlowDefinition, StepDefinition};

/// Lifecycle phase of one flow instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowPhase {
    /// Actively collecting fields.
    Collecting,
    /// Lead persisted. Holds the visitor's name for the confirmation
    /// message. Terminal until [`FlowEngine::reset`].
    Submitted { name: String },
}

impl std::fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowPhase::Collecting => write!(f, "collecting"),
            FlowPhase::Submitted { .. } => write!(f, "submitted"),
        }
    }
}

/// Read-only view of engine state handed to the presentation shells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub step_index: usize,
    pub total_steps: usize,
    pub step_id: String,
    pub step_title: String,
    pub draft: LeadDraft,
    pub is_submitting: bool,
    pub submitted_ok: bool,
    pub submitted_name: Option<String>,
    pub last_error: Option<String>,
}

/// Drives one visitor through an ordered set of steps, validating at each
/// boundary, and persists the completed draft through the lead store.
///
/// The engine is variant-agnostic: the wizard and the chatbot both run
/// this type, parameterized by their [`FlowDefinition`].
pub struct FlowEngine {
    flow: FlowDefinition,
    step_index: usize,
    draft: LeadDraft,
    phase: FlowPhase,
    is_submitting: bool,
    last_error: Option<String>,
    store: Arc<dyn LeadStore + Send + Sync>,
}

impl FlowEngine {
    /// Creates an engine at step 0 with an empty draft.
    pub fn new(flow: FlowDefinition, store: Arc<dyn LeadStore + Send + Sync>) -> Self {
        Self {
            flow,
            step_index: 0,
            draft: LeadDraft::default(),
            phase: FlowPhase::Collecting,
            is_submitting: false,
            last_error: None,
            store,
        }
    }

    pub fn flow(&self) -> &FlowDefinition {
        &self.flow
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn total_steps(&self) -> usize {
        self.flow.steps.len()
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.flow.steps[self.step_index]
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the cursor sits on the last step of the flow.
    pub fn is_final_step(&self) -> bool {
        self.step_index == self.flow.steps.len() - 1
    }

    /// Assigns one draft field. Never validates; ignored once submitted.
    pub fn set_field(&mut self, field: FieldId, value: impl Into<String>) {
        if matches!(self.phase, FlowPhase::Submitted { .. }) {
            debug!(flow = %self.flow.kind, field = %field, "field ignored after submission");
            return;
        }
        self.draft.set(field, value);
    }

    /// Moves forward one step if the current step's gate passes.
    ///
    /// On a validation failure nothing changes and the error names the
    /// missing fields. The cursor clamps at the final step; transition
    /// requests after submission are ignored.
    pub fn advance(&mut self) -> Result<(), SunleadError> {
        if matches!(self.phase, FlowPhase::Submitted { .. }) {
            return Ok(());
        }
        self.current_step().validate(&self.draft)?;
        if self.step_index + 1 < self.flow.steps.len() {
            self.step_index += 1;
            debug!(
                flow = %self.flow.kind,
                step = self.current_step().id,
                "advanced to step {}",
                self.step_index
            );
        }
        Ok(())
    }

    /// Moves back one step, clamped at 0. Never validates; the draft keeps
    /// its values so the visitor can edit them.
    pub fn retreat(&mut self) {
        if matches!(self.phase, FlowPhase::Submitted { .. }) {
            return;
        }
        self.step_index = self.step_index.saturating_sub(1);
    }

    /// Validates every step's gate against the current draft.
    fn validate_all(&self) -> Result<(), SunleadError> {
        let mut missing: Vec<FieldId> = Vec::new();
        for step in self.flow.steps {
            missing.extend(step.missing_fields(&self.draft));
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SunleadError::Validation { missing })
        }
    }

    /// Persists the draft through the lead store.
    ///
    /// Legal only on the final step, and re-validates every step first
    /// (not just the last), so an invalid draft never reaches the store.
    /// On store failure the engine stays on the final step, records the
    /// store's message verbatim in `last_error`, and leaves the draft
    /// untouched so the visitor can retry without re-entering anything.
    /// Calling submit again after success is a no-op.
    pub async fn submit(&mut self) -> Result<(), SunleadError> {
        if matches!(self.phase, FlowPhase::Submitted { .. }) {
            return Ok(());
        }
        if !self.is_final_step() {
            return Err(SunleadError::Internal(format!(
                "submit on step {} of {}",
                self.step_index,
                self.flow.steps.len()
            )));
        }
        self.validate_all()?;

        let mut record = self.draft.to_new_lead(self.flow.source);
        if record.message.is_none()
            && let Some(fallback) = self.flow.empty_message_fallback
        {
            record.message = Some(fallback.to_string());
        }

        self.is_submitting = true;
        self.last_error = None;
        debug!(flow = %self.flow.kind, "submitting lead");
        let result = self.store.create_lead(&record).await;
        self.is_submitting = false;

        match result {
            Ok(lead) => {
                info!(flow = %self.flow.kind, lead_id = %lead.id, "lead submitted");
                self.phase = FlowPhase::Submitted { name: record.name };
                Ok(())
            }
            Err(err) => {
                let message = err.user_message();
                warn!(flow = %self.flow.kind, error = %message, "lead submission failed");
                self.last_error = Some(message);
                Err(err)
            }
        }
    }

    /// Returns to the initial state: empty draft, step 0, terminal phase
    /// and last error cleared. Never triggered automatically by failure.
    pub fn reset(&mut self) {
        self.draft = LeadDraft::default();
        self.step_index = 0;
        self.phase = FlowPhase::Collecting;
        self.is_submitting = false;
        self.last_error = None;
        debug!(flow = %self.flow.kind, "flow reset");
    }

    /// Snapshot of everything a shell needs to render this flow.
    pub fn snapshot(&self) -> FlowSnapshot {
        let step = self.current_step();
        let submitted_name = match &self.phase {
            FlowPhase::Submitted { name } => Some(name.clone()),
            FlowPhase::Collecting => None,
        };
        FlowSnapshot {
            step_index: self.step_index,
            total_steps: self.flow.steps.len(),
            step_id: step.id.to_string(),
            step_title: step.title.to_string(),
            draft: self.draft.clone(),
            is_submitting: self.is_submitting,
            submitted_ok: submitted_name.is_some(),
            submitted_name,
            last_error: self.last_error.clone(),
        }
    }
}
