// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static step tables for the two capture flow variants.
//!
//! Both variants share the engine in [`crate::engine`]; only these tables
//! differ. The wizard packs several fields per step; the conversational
//! flow asks for one field per turn.

use sunlead_core::{FieldId, LeadSource, SunleadError};

use crate::draft::LeadDraft;

/// Persisted in place of an empty chatbot message so admins can tell the
/// two entry points apart at a glance.
pub const CHATBOT_EMPTY_MESSAGE: &str = "Quote request from chatbot";

/// One stage of a capture flow: the fields it collects and which of them
/// gate the step boundary. Defined at startup, immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub required: &'static [FieldId],
    pub optional: &'static [FieldId],
}

impl StepDefinition {
    /// Required fields still blank in the draft, in declaration order.
    pub fn missing_fields(&self, draft: &LeadDraft) -> Vec<FieldId> {
        self.required
            .iter()
            .copied()
            .filter(|f| draft.is_blank(*f))
            .collect()
    }

    /// Validates the gate for this step against the draft.
    pub fn validate(&self, draft: &LeadDraft) -> Result<(), SunleadError> {
        let missing = self.missing_fields(draft);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SunleadError::Validation { missing })
        }
    }

    /// The single field a conversational turn fills in on this step.
    ///
    /// `None` for steps that collect nothing, like the wizard's review.
    pub fn collected_field(&self) -> Option<FieldId> {
        self.required.first().or(self.optional.first()).copied()
    }
}

const WIZARD_STEPS: &[StepDefinition] = &[
    StepDefinition {
        id: "personal_info",
        title: "Personal Info",
        required: &[FieldId::Name, FieldId::Phone, FieldId::Email],
        optional: &[],
    },
    StepDefinition {
        id: "project_details",
        title: "Project Details",
        required: &[FieldId::PropertyType, FieldId::SystemSize],
        optional: &[FieldId::RoofType],
    },
    StepDefinition {
        id: "preferences",
        title: "Preferences",
        required: &[FieldId::Budget, FieldId::Timeline],
        optional: &[FieldId::Message],
    },
    // Review collects nothing new; submit re-validates the gates above.
    StepDefinition {
        id: "review",
        title: "Review",
        required: &[],
        optional: &[],
    },
];

// The contact-page form renders these as selects; the canonical option
// labels are stored verbatim in the draft.
const WIZARD_CHOICES: &[(FieldId, &[&str])] = &[
    (
        FieldId::PropertyType,
        &["Residential", "Commercial", "Industrial"],
    ),
    (
        FieldId::SystemSize,
        &["1-2 kW", "3-5 kW", "5-10 kW", "10+ kW", "Not Sure"],
    ),
    (
        FieldId::RoofType,
        &["Flat Roof", "Sloped Roof", "Mixed", "Not Sure"],
    ),
    (
        FieldId::Budget,
        &["Under ₹1L", "₹1L - ₹2L", "₹2L - ₹5L", "Above ₹5L"],
    ),
    (
        FieldId::Timeline,
        &["Immediate", "Within 1 Month", "1-3 Months", "Just Exploring"],
    ),
];

// The chatbot speaks its options inside the field prompts; only the
// system-size buckets are shared data (the prompt is built from them).
// Property-type replies go through free-text normalization instead.
const CONVERSATION_CHOICES: &[(FieldId, &[&str])] = &[(
    FieldId::SystemSize,
    &[
        "Small (1-5 kW)",
        "Medium (5-20 kW)",
        "Large (20-50 kW)",
        "Extra Large (50+ kW)",
        "Not sure",
    ],
)];

const CONVERSATION_STEPS: &[StepDefinition] = &[
    StepDefinition {
        id: "name",
        title: "Your Name",
        required: &[FieldId::Name],
        optional: &[],
    },
    StepDefinition {
        id: "email",
        title: "Email Address",
        required: &[FieldId::Email],
        optional: &[],
    },
    StepDefinition {
        id: "phone",
        title: "Phone Number",
        required: &[FieldId::Phone],
        optional: &[],
    },
    StepDefinition {
        id: "property_type",
        title: "Property Type",
        required: &[FieldId::PropertyType],
        optional: &[],
    },
    StepDefinition {
        id: "system_size",
        title: "System Size",
        required: &[FieldId::SystemSize],
        optional: &[],
    },
    // The message may legitimately be empty ("none"), so it never gates.
    StepDefinition {
        id: "message",
        title: "Requirements",
        required: &[],
        optional: &[FieldId::Message],
    },
];

/// Which capture flow variant an engine instance is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    /// The paginated contact-page form.
    Wizard,
    /// The one-field-per-turn chatbot sequence.
    Conversation,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowKind::Wizard => write!(f, "wizard"),
            FlowKind::Conversation => write!(f, "conversation"),
        }
    }
}

/// A complete flow variant: its step table, the source tag stamped on
/// leads it produces, and any variant-specific persistence quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowDefinition {
    pub kind: FlowKind,
    pub steps: &'static [StepDefinition],
    pub source: LeadSource,
    /// Substituted for an empty message at persistence time.
    pub empty_message_fallback: Option<&'static str>,
    /// Pick-list options per field; fields not listed are free text.
    pub choice_lists: &'static [(FieldId, &'static [&'static str])],
}

impl FlowDefinition {
    /// The four-step contact-page wizard.
    pub const fn wizard() -> Self {
        FlowDefinition {
            kind: FlowKind::Wizard,
            steps: WIZARD_STEPS,
            source: LeadSource::ContactForm,
            empty_message_fallback: None,
            choice_lists: WIZARD_CHOICES,
        }
    }

    /// The six-question chatbot sequence.
    pub const fn conversation() -> Self {
        FlowDefinition {
            kind: FlowKind::Conversation,
            steps: CONVERSATION_STEPS,
            source: LeadSource::Chatbot,
            empty_message_fallback: Some(CHATBOT_EMPTY_MESSAGE),
            choice_lists: CONVERSATION_CHOICES,
        }
    }

    /// Canonical pick-list options for a field. Empty for free-text fields.
    pub fn choices(&self, field: FieldId) -> &'static [&'static str] {
        self.choice_lists
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, options)| *options)
            .unwrap_or(&[])
    }
}
