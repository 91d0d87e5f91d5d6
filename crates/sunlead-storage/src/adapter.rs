// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the store traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use sunlead_config::model::StorageConfig;
use sunlead_core::types::{
    Lead, LeadId, LeadStatus, NewLead, NewProject, NewService, Project, Service, StoreHealth,
};
use sunlead_core::{CatalogStore, LeadStore, StoreAdapter, SunleadError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily opened on the first call to
/// [`StoreAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StoreAdapter::initialize`]
    /// is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, SunleadError> {
        self.db
            .get()
            .ok_or_else(|| SunleadError::store("storage not initialized; call initialize() first"))
    }
}

#[async_trait]
impl StoreAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), SunleadError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db
            .set(db)
            .map_err(|_| SunleadError::store("storage already initialized"))?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn health_check(&self) -> Result<StoreHealth, SunleadError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(StoreHealth::Healthy)
    }

    async fn shutdown(&self) -> Result<(), SunleadError> {
        // Shutdown delegates to close if the DB was initialized.
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl LeadStore for SqliteStorage {
    async fn create_lead(&self, lead: &NewLead) -> Result<Lead, SunleadError> {
        queries::leads::create_lead(self.db()?, lead).await
    }

    async fn get_lead(&self, id: &LeadId) -> Result<Option<Lead>, SunleadError> {
        queries::leads::get_lead(self.db()?, id).await
    }

    async fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, SunleadError> {
        queries::leads::list_leads(self.db()?, status).await
    }

    async fn update_lead_status(
        &self,
        id: &LeadId,
        status: LeadStatus,
    ) -> Result<Lead, SunleadError> {
        queries::leads::update_lead_status(self.db()?, id, status)
            .await?
            .ok_or_else(|| SunleadError::NotFound {
                what: "lead",
                id: id.to_string(),
            })
    }

    async fn delete_lead(&self, id: &LeadId) -> Result<(), SunleadError> {
        if queries::leads::delete_lead(self.db()?, id).await? {
            Ok(())
        } else {
            Err(SunleadError::NotFound {
                what: "lead",
                id: id.to_string(),
            })
        }
    }
}

#[async_trait]
impl CatalogStore for SqliteStorage {
    async fn list_services(&self, include_inactive: bool) -> Result<Vec<Service>, SunleadError> {
        queries::catalog::list_services(self.db()?, include_inactive).await
    }

    async fn create_service(&self, service: &NewService) -> Result<Service, SunleadError> {
        queries::catalog::create_service(self.db()?, service).await
    }

    async fn update_service(
        &self,
        id: &str,
        service: &NewService,
    ) -> Result<Service, SunleadError> {
        queries::catalog::update_service(self.db()?, id, service)
            .await?
            .ok_or_else(|| SunleadError::NotFound {
                what: "service",
                id: id.to_string(),
            })
    }

    async fn delete_service(&self, id: &str) -> Result<(), SunleadError> {
        if queries::catalog::delete_service(self.db()?, id).await? {
            Ok(())
        } else {
            Err(SunleadError::NotFound {
                what: "service",
                id: id.to_string(),
            })
        }
    }

    async fn list_projects(&self, include_inactive: bool) -> Result<Vec<Project>, SunleadError> {
        queries::catalog::list_projects(self.db()?, include_inactive).await
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, SunleadError> {
        queries::catalog::create_project(self.db()?, project).await
    }

    async fn update_project(
        &self,
        id: &str,
        project: &NewProject,
    ) -> Result<Project, SunleadError> {
        queries::catalog::update_project(self.db()?, id, project)
            .await?
            .ok_or_else(|| SunleadError::NotFound {
                what: "project",
                id: id.to_string(),
            })
    }

    async fn delete_project(&self, id: &str) -> Result<(), SunleadError> {
        if queries::catalog::delete_project(self.db()?, id).await? {
            Ok(())
        } else {
            Err(SunleadError::NotFound {
                what: "project",
                id: id.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunlead_core::types::LeadSource;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    fn make_new_lead(name: &str) -> NewLead {
        NewLead {
            name: name.to_string(),
            phone: "9876543210".to_string(),
            email: "lead@example.com".to_string(),
            property_type: Some("Residential".to_string()),
            system_size: None,
            budget: None,
            timeline: None,
            roof_type: None,
            message: Some("Call me after 6pm".to_string()),
            source: LeadSource::ContactForm,
        }
    }

    #[tokio::test]
    async fn adapter_reports_its_name() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        assert_eq!(storage.name(), "sqlite");
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        let result = storage.initialize().await;
        assert!(result.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        let status = storage.health_check().await.unwrap();
        assert_eq!(status, StoreHealth::Healthy);
    }

    #[tokio::test]
    async fn health_check_fails_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        let result = storage.health_check().await;
        assert!(result.is_err(), "health_check should fail before initialize");
    }

    #[tokio::test]
    async fn full_lead_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        // Create a lead.
        let created = storage.create_lead(&make_new_lead("Ravi")).await.unwrap();
        assert_eq!(created.status, LeadStatus::New);

        // Retrieve it.
        let retrieved = storage.get_lead(&created.id).await.unwrap();
        assert_eq!(retrieved.as_ref().map(|l| l.name.as_str()), Some("Ravi"));

        // Move it through the workflow.
        let contacted = storage
            .update_lead_status(&created.id, LeadStatus::Contacted)
            .await
            .unwrap();
        assert_eq!(contacted.status, LeadStatus::Contacted);

        // List with and without filter.
        assert_eq!(storage.list_leads(None).await.unwrap().len(), 1);
        assert!(
            storage
                .list_leads(Some(LeadStatus::New))
                .await
                .unwrap()
                .is_empty()
        );

        // Delete, then the id is gone.
        storage.delete_lead(&created.id).await.unwrap();
        assert!(storage.get_lead(&created.id).await.unwrap().is_none());
        let missing = storage.delete_lead(&created.id).await;
        assert!(matches!(missing, Err(SunleadError::NotFound { .. })));

        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn status_update_on_unknown_lead_is_not_found() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("unknown.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        let result = storage
            .update_lead_status(&LeadId("ghost".to_string()), LeadStatus::Cancelled)
            .await;
        assert!(matches!(result, Err(SunleadError::NotFound { .. })));
    }

    #[tokio::test]
    async fn catalog_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        let service = storage
            .create_service(&NewService {
                title: "Commercial Solar".to_string(),
                description: "Rooftop plants for factories".to_string(),
                features: vec!["ROI in 3-5 years".to_string()],
                pricing: Some("\u{20b9}45,000 per kW".to_string()),
                timeline: None,
                display_order: 1,
                is_active: true,
            })
            .await
            .unwrap();

        let mut replacement = NewService {
            title: "Commercial & Industrial Solar".to_string(),
            description: service.description.clone(),
            features: service.features.clone(),
            pricing: service.pricing.clone(),
            timeline: Some("4-8 weeks".to_string()),
            display_order: 2,
            is_active: true,
        };
        let updated = storage.update_service(&service.id, &replacement).await.unwrap();
        assert_eq!(updated.title, "Commercial & Industrial Solar");

        replacement.is_active = false;
        storage.update_service(&service.id, &replacement).await.unwrap();
        assert!(storage.list_services(false).await.unwrap().is_empty());
        assert_eq!(storage.list_services(true).await.unwrap().len(), 1);

        storage.delete_service(&service.id).await.unwrap();
        let missing = storage.update_service(&service.id, &replacement).await;
        assert!(matches!(missing, Err(SunleadError::NotFound { .. })));

        let project = storage
            .create_project(&NewProject {
                title: "Mall Carport".to_string(),
                category: "commercial".to_string(),
                location: "Jaipur".to_string(),
                capacity: "120 kW".to_string(),
                description: "Carport array over visitor parking".to_string(),
                completion_date: None,
                panel_count: Some(300),
                system_type: Some("On-grid".to_string()),
                monthly_savings: None,
                co2_reduction: Some("130 t/year".to_string()),
                display_order: 1,
                is_active: true,
            })
            .await
            .unwrap();
        assert_eq!(storage.list_projects(false).await.unwrap().len(), 1);
        storage.delete_project(&project.id).await.unwrap();
        let missing = storage.delete_project(&project.id).await;
        assert!(matches!(missing, Err(SunleadError::NotFound { .. })));

        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_runs_checkpoint() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("shutdown.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.initialize().await.unwrap();

        // Write some data.
        storage.create_lead(&make_new_lead("Ravi")).await.unwrap();

        // Shutdown should succeed.
        storage.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn shutdown_before_initialize_is_a_no_op() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("never_opened.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));
        storage.shutdown().await.unwrap();
        assert!(!db_path.exists());
    }
}
