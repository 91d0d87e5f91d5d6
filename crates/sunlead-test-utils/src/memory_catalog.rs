// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory catalog store for gateway and CLI tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use sunlead_core::{
    CatalogStore, NewProject, NewService, Project, Service, StoreAdapter, StoreHealth,
    SunleadError,
};

/// A catalog store backed by process memory. Rows keep insertion ids and
/// honor `display_order` on listing, matching the SQLite behavior.
pub struct MemoryCatalogStore {
    services: Mutex<Vec<Service>>,
    projects: Mutex<Vec<Project>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            services: Mutex::new(Vec::new()),
            projects: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreAdapter for MemoryCatalogStore {
    fn name(&self) -> &str {
        "memory-catalog"
    }

    async fn initialize(&self) -> Result<(), SunleadError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<StoreHealth, SunleadError> {
        Ok(StoreHealth::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SunleadError> {
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_services(&self, include_inactive: bool) -> Result<Vec<Service>, SunleadError> {
        let mut rows: Vec<Service> = self
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| include_inactive || s.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.display_order);
        Ok(rows)
    }

    async fn create_service(&self, service: &NewService) -> Result<Service, SunleadError> {
        let now = Utc::now();
        let stored = Service {
            id: uuid::Uuid::new_v4().to_string(),
            title: service.title.clone(),
            description: service.description.clone(),
            features: service.features.clone(),
            pricing: service.pricing.clone(),
            timeline: service.timeline.clone(),
            display_order: service.display_order,
            is_active: service.is_active,
            created_at: now,
            updated_at: now,
        };
        self.services.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_service(
        &self,
        id: &str,
        service: &NewService,
    ) -> Result<Service, SunleadError> {
        let mut rows = self.services.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| SunleadError::NotFound {
                what: "service",
                id: id.to_string(),
            })?;
        row.title = service.title.clone();
        row.description = service.description.clone();
        row.features = service.features.clone();
        row.pricing = service.pricing.clone();
        row.timeline = service.timeline.clone();
        row.display_order = service.display_order;
        row.is_active = service.is_active;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_service(&self, id: &str) -> Result<(), SunleadError> {
        let mut rows = self.services.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        if rows.len() == before {
            return Err(SunleadError::NotFound {
                what: "service",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_projects(&self, include_inactive: bool) -> Result<Vec<Project>, SunleadError> {
        let mut rows: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| include_inactive || p.is_active)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.display_order);
        Ok(rows)
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, SunleadError> {
        let now = Utc::now();
        let stored = Project {
            id: uuid::Uuid::new_v4().to_string(),
            title: project.title.clone(),
            category: project.category.clone(),
            location: project.location.clone(),
            capacity: project.capacity.clone(),
            description: project.description.clone(),
            completion_date: project.completion_date.clone(),
            panel_count: project.panel_count,
            system_type: project.system_type.clone(),
            monthly_savings: project.monthly_savings.clone(),
            co2_reduction: project.co2_reduction.clone(),
            display_order: project.display_order,
            is_active: project.is_active,
            created_at: now,
            updated_at: now,
        };
        self.projects.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn update_project(
        &self,
        id: &str,
        project: &NewProject,
    ) -> Result<Project, SunleadError> {
        let mut rows = self.projects.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| SunleadError::NotFound {
                what: "project",
                id: id.to_string(),
            })?;
        row.title = project.title.clone();
        row.category = project.category.clone();
        row.location = project.location.clone();
        row.capacity = project.capacity.clone();
        row.description = project.description.clone();
        row.completion_date = project.completion_date.clone();
        row.panel_count = project.panel_count;
        row.system_type = project.system_type.clone();
        row.monthly_savings = project.monthly_savings.clone();
        row.co2_reduction = project.co2_reduction.clone();
        row.display_order = project.display_order;
        row.is_active = project.is_active;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_project(&self, id: &str) -> Result<(), SunleadError> {
        let mut rows = self.projects.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(SunleadError::NotFound {
                what: "project",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
