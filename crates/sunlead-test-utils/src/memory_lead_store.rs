// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory lead store for deterministic testing.
//!
//! `MemoryLeadStore` implements `LeadStore` against a plain `Vec`, with a
//! FIFO failure queue so tests can script store outages without a real
//! backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use sunlead_core::{
    Lead, LeadId, LeadStatus, LeadStore, NewLead, StoreAdapter, StoreHealth, SunleadError,
};

/// A lead store backed by process memory.
///
/// Failures pushed via [`MemoryLeadStore::push_failure`] are consumed one
/// per `create_lead` call before any record is stored, which makes the
/// retry contract easy to script: queue one failure, watch the first
/// submit fail, watch the second succeed.
pub struct MemoryLeadStore {
    leads: Mutex<Vec<Lead>>,
    failures: Mutex<VecDeque<String>>,
    health: Mutex<StoreHealth>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self {
            leads: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            health: Mutex::new(StoreHealth::Healthy),
        }
    }

    /// Queues one failure; the next `create_lead` returns it verbatim.
    pub fn push_failure(&self, message: impl Into<String>) {
        self.failures.lock().unwrap().push_back(message.into());
    }

    /// Overrides what `health_check` reports.
    pub fn set_health(&self, health: StoreHealth) {
        *self.health.lock().unwrap() = health;
    }

    /// Snapshot of every lead created so far, oldest first.
    pub fn created(&self) -> Vec<Lead> {
        self.leads.lock().unwrap().clone()
    }

    pub fn created_count(&self) -> usize {
        self.leads.lock().unwrap().len()
    }
}

impl Default for MemoryLeadStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreAdapter for MemoryLeadStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn initialize(&self) -> Result<(), SunleadError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<StoreHealth, SunleadError> {
        Ok(self.health.lock().unwrap().clone())
    }

    async fn shutdown(&self) -> Result<(), SunleadError> {
        Ok(())
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn create_lead(&self, lead: &NewLead) -> Result<Lead, SunleadError> {
        if let Some(message) = self.failures.lock().unwrap().pop_front() {
            return Err(SunleadError::store(message));
        }
        let now = Utc::now();
        let stored = Lead {
            id: LeadId(uuid::Uuid::new_v4().to_string()),
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone(),
            property_type: lead.property_type.clone(),
            system_size: lead.system_size.clone(),
            budget: lead.budget.clone(),
            timeline: lead.timeline.clone(),
            roof_type: lead.roof_type.clone(),
            message: lead.message.clone(),
            source: lead.source,
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
        };
        self.leads.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn get_lead(&self, id: &LeadId) -> Result<Option<Lead>, SunleadError> {
        Ok(self
            .leads
            .lock()
            .unwrap()
            .iter()
            .find(|l| &l.id == id)
            .cloned())
    }

    async fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, SunleadError> {
        let mut leads: Vec<Lead> = self
            .leads
            .lock()
            .unwrap()
            .iter()
            .filter(|l| status.is_none_or(|s| l.status == s))
            .cloned()
            .collect();
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn update_lead_status(
        &self,
        id: &LeadId,
        status: LeadStatus,
    ) -> Result<Lead, SunleadError> {
        let mut leads = self.leads.lock().unwrap();
        let lead = leads
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| SunleadError::NotFound {
                what: "lead",
                id: id.0.clone(),
            })?;
        lead.status = status;
        lead.updated_at = Utc::now();
        Ok(lead.clone())
    }

    async fn delete_lead(&self, id: &LeadId) -> Result<(), SunleadError> {
        let mut leads = self.leads.lock().unwrap();
        let before = leads.len();
        leads.retain(|l| &l.id != id);
        if leads.len() == before {
            return Err(SunleadError::NotFound {
                what: "lead",
                id: id.0.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunlead_core::LeadSource;

    fn sample_lead() -> NewLead {
        NewLead {
            name: "Asha".into(),
            phone: "9999999999".into(),
            email: "a@x.com".into(),
            property_type: Some("residential".into()),
            system_size: Some("3-5 kW".into()),
            budget: None,
            timeline: None,
            roof_type: None,
            message: None,
            source: LeadSource::ContactForm,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_status_and_timestamps() {
        let store = MemoryLeadStore::new();
        let lead = store.create_lead(&sample_lead()).await.unwrap();
        assert!(!lead.id.0.is_empty());
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.created_at, lead.updated_at);
    }

    #[tokio::test]
    async fn queued_failure_is_consumed_once() {
        let store = MemoryLeadStore::new();
        store.push_failure("network unreachable");

        let err = store.create_lead(&sample_lead()).await.unwrap_err();
        assert_eq!(err.user_message(), "network unreachable");
        assert_eq!(store.created_count(), 0);

        store.create_lead(&sample_lead()).await.unwrap();
        assert_eq!(store.created_count(), 1);
    }

    #[tokio::test]
    async fn status_filter_and_newest_first_ordering() {
        let store = MemoryLeadStore::new();
        let first = store.create_lead(&sample_lead()).await.unwrap();
        let second = store.create_lead(&sample_lead()).await.unwrap();
        store
            .update_lead_status(&first.id, LeadStatus::Contacted)
            .await
            .unwrap();

        let contacted = store.list_leads(Some(LeadStatus::Contacted)).await.unwrap();
        assert_eq!(contacted.len(), 1);
        assert_eq!(contacted[0].id, first.id);

        let all = store.list_leads(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at >= all[1].created_at);
        let _ = second;
    }

    #[tokio::test]
    async fn delete_unknown_lead_is_not_found() {
        let store = MemoryLeadStore::new();
        let err = store
            .delete_lead(&LeadId("missing".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, SunleadError::NotFound { .. }));
    }
}
