// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sunlead lead-capture service.
//!
//! This crate provides the shared types, error definitions, and store
//! traits used throughout the Sunlead workspace. Store backends implement
//! traits defined here; the flow engine and gateway consume them as
//! `Arc<dyn Trait>`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SunleadError;
pub use types::{
    ConversationTurn, FieldId, Lead, LeadId, LeadSource, LeadStatus, NewLead, NewProject,
    NewService, Project, Service, StoreHealth, TurnRole,
};

pub use traits::{CatalogStore, LeadStore, StoreAdapter};
