// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the flow engine, the stores, and the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a persisted lead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one field of the lead draft.
///
/// The Display form is the wire/column name (`property_type`), which is
/// also what validation errors print.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Phone,
    Email,
    PropertyType,
    SystemSize,
    Budget,
    Timeline,
    RoofType,
    Message,
}

/// Which entry point produced a lead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    ContactForm,
    Chatbot,
}

/// Workflow status of a persisted lead. New leads always start as `New`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Completed,
    Cancelled,
}

/// A completed draft ready for persistence. The store assigns the id,
/// the initial status, and both timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub property_type: Option<String>,
    pub system_size: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub roof_type: Option<String>,
    pub message: Option<String>,
    pub source: LeadSource,
}

/// A persisted lead. Identity is immutable once created; `status` and
/// `updated_at` change through [`crate::traits::LeadStore::update_lead_status`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub property_type: Option<String>,
    pub system_size: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub roof_type: Option<String>,
    pub message: Option<String>,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who authored one transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Bot,
    User,
}

/// One bot or user message in a conversational session. Append-only:
/// turns are never mutated after being recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Bot,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Health reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreHealth {
    /// Store is fully operational.
    Healthy,
    /// Store is operational but experiencing issues.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}

/// One service offering shown on the public site and managed by admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub pricing: Option<String>,
    pub timeline: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an admin supplies when creating or replacing a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub pricing: Option<String>,
    pub timeline: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One completed installation shown on the public site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub location: String,
    pub capacity: String,
    pub description: String,
    pub completion_date: Option<String>,
    pub panel_count: Option<i64>,
    pub system_type: Option<String>,
    pub monthly_savings: Option<String>,
    pub co2_reduction: Option<String>,
    pub display_order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an admin supplies when creating or replacing a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub category: String,
    pub location: String,
    pub capacity: String,
    pub description: String,
    pub completion_date: Option<String>,
    pub panel_count: Option<i64>,
    pub system_type: Option<String>,
    pub monthly_savings: Option<String>,
    pub co2_reduction: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
