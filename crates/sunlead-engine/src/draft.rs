// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-progress, unpersisted set of field values being collected.

use serde::{Deserialize, Serialize};

use sunlead_core::{FieldId, LeadSource, NewLead};

/// One visitor's draft, owned exclusively by a single [`crate::FlowEngine`]
/// instance. All fields start empty; a field counts as collected once it is
/// non-empty after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub property_type: String,
    pub system_size: String,
    pub budget: String,
    pub timeline: String,
    pub roof_type: String,
    pub message: String,
}

impl LeadDraft {
    /// Returns the raw value of one field.
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Phone => &self.phone,
            FieldId::Email => &self.email,
            FieldId::PropertyType => &self.property_type,
            FieldId::SystemSize => &self.system_size,
            FieldId::Budget => &self.budget,
            FieldId::Timeline => &self.timeline,
            FieldId::RoofType => &self.roof_type,
            FieldId::Message => &self.message,
        }
    }

    /// Overwrites one field. Pure assignment: no validation happens here.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldId::Name => self.name = value,
            FieldId::Phone => self.phone = value,
            FieldId::Email => self.email = value,
            FieldId::PropertyType => self.property_type = value,
            FieldId::SystemSize => self.system_size = value,
            FieldId::Budget => self.budget = value,
            FieldId::Timeline => self.timeline = value,
            FieldId::RoofType => self.roof_type = value,
            FieldId::Message => self.message = value,
        }
    }

    /// Whether a field is still empty after trimming whitespace.
    pub fn is_blank(&self, field: FieldId) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Maps the draft to its persisted shape: required fields trimmed,
    /// optional fields trimmed with empty collapsing to `None`.
    pub fn to_new_lead(&self, source: LeadSource) -> NewLead {
        NewLead {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            property_type: opt(&self.property_type),
            system_size: opt(&self.system_size),
            budget: opt(&self.budget),
            timeline: opt(&self.timeline),
            roof_type: opt(&self.roof_type),
            message: opt(&self.message),
            source,
        }
    }
}

fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
