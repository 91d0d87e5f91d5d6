// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead persistence trait.

use async_trait::async_trait;

use crate::error::SunleadError;
use crate::traits::adapter::StoreAdapter;
use crate::types::{Lead, LeadId, LeadStatus, NewLead};

/// Persistence for captured leads.
///
/// The flow engine consumes only [`LeadStore::create_lead`]; the remaining
/// operations back the admin surfaces. The store assigns the id, sets the
/// initial status to [`LeadStatus::New`], and stamps both timestamps.
#[async_trait]
pub trait LeadStore: StoreAdapter {
    /// Persists a completed draft and returns the stored record.
    ///
    /// Fails with [`SunleadError::Store`] on connectivity or constraint
    /// failure; the caller surfaces that message verbatim and may retry
    /// with the same draft.
    async fn create_lead(&self, lead: &NewLead) -> Result<Lead, SunleadError>;

    /// Fetches one lead, or `None` if the id is unknown.
    async fn get_lead(&self, id: &LeadId) -> Result<Option<Lead>, SunleadError>;

    /// Lists leads newest-first, optionally filtered by status.
    async fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, SunleadError>;

    /// Moves a lead to a new status, refreshing `updated_at` server-side.
    /// Returns the updated record, or [`SunleadError::NotFound`].
    async fn update_lead_status(
        &self,
        id: &LeadId,
        status: LeadStatus,
    ) -> Result<Lead, SunleadError>;

    /// Removes a lead. Fails with [`SunleadError::NotFound`] for unknown ids.
    async fn delete_lead(&self, id: &LeadId) -> Result<(), SunleadError>;
}
