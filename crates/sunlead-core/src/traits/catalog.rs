// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog persistence trait for services and projects.

use async_trait::async_trait;

use crate::error::SunleadError;
use crate::traits::adapter::StoreAdapter;
use crate::types::{NewProject, NewService, Project, Service};

/// Persistence for the public catalog (service offerings and completed
/// projects). Public reads return active rows ordered by `display_order`;
/// admin operations see everything.
#[async_trait]
pub trait CatalogStore: StoreAdapter {
    /// Lists services ordered by `display_order`. With
    /// `include_inactive = false` only active rows are returned.
    async fn list_services(&self, include_inactive: bool) -> Result<Vec<Service>, SunleadError>;

    /// Creates a service and returns the stored row.
    async fn create_service(&self, service: &NewService) -> Result<Service, SunleadError>;

    /// Replaces a service's fields, refreshing `updated_at` server-side.
    async fn update_service(
        &self,
        id: &str,
        service: &NewService,
    ) -> Result<Service, SunleadError>;

    /// Removes a service. Fails with [`SunleadError::NotFound`] for unknown ids.
    async fn delete_service(&self, id: &str) -> Result<(), SunleadError>;

    /// Lists projects ordered by `display_order`. With
    /// `include_inactive = false` only active rows are returned.
    async fn list_projects(&self, include_inactive: bool) -> Result<Vec<Project>, SunleadError>;

    /// Creates a project and returns the stored row.
    async fn create_project(&self, project: &NewProject) -> Result<Project, SunleadError>;

    /// Replaces a project's fields, refreshing `updated_at` server-side.
    async fn update_project(
        &self,
        id: &str,
        project: &NewProject,
    ) -> Result<Project, SunleadError>;

    /// Removes a project. Fails with [`SunleadError::NotFound`] for unknown ids.
    async fn delete_project(&self, id: &str) -> Result<(), SunleadError>;
}
