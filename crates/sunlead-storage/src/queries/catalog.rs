// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog CRUD operations for services and projects.
//!
//! `features` is stored as a JSON array in a TEXT column. Public listings
//! filter on `is_active`; admin listings pass `include_inactive = true`.

use rusqlite::params;

use sunlead_core::SunleadError;

use crate::database::Database;
use crate::models::{
    self, NewProject, NewService, PROJECT_COLUMNS, Project, SERVICE_COLUMNS, Service,
};

fn encode_features(features: &[String]) -> Result<String, SunleadError> {
    serde_json::to_string(features).map_err(|e| SunleadError::Store {
        message: format!("cannot encode features: {e}"),
        source: Some(Box::new(e)),
    })
}

/// List services ordered by `display_order`.
pub async fn list_services(
    db: &Database,
    include_inactive: bool,
) -> Result<Vec<Service>, SunleadError> {
    db.connection()
        .call(move |conn| {
            let sql = if include_inactive {
                format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY display_order, created_at")
            } else {
                format!(
                    "SELECT {SERVICE_COLUMNS} FROM services WHERE is_active = 1
                     ORDER BY display_order, created_at"
                )
            };
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], models::service_from_row)?;
            let mut services = Vec::new();
            for row in rows {
                services.push(row?);
            }
            Ok(services)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a service. The store assigns the id and both timestamps.
pub async fn create_service(db: &Database, new: &NewService) -> Result<Service, SunleadError> {
    let now = models::now();
    let service = Service {
        id: models::new_id(),
        title: new.title.clone(),
        description: new.description.clone(),
        features: new.features.clone(),
        pricing: new.pricing.clone(),
        timeline: new.timeline.clone(),
        display_order: new.display_order,
        is_active: new.is_active,
        created_at: now,
        updated_at: now,
    };
    let features = encode_features(&service.features)?;
    let row = service.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO services (id, title, description, features, pricing, timeline,
                 display_order, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row.id,
                    row.title,
                    row.description,
                    features,
                    row.pricing,
                    row.timeline,
                    row.display_order,
                    row.is_active,
                    models::format_timestamp(row.created_at),
                    models::format_timestamp(row.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(service)
}

/// Replace a service's fields, refreshing `updated_at` server-side.
/// Returns the refreshed row, or `None` if the id is unknown.
pub async fn update_service(
    db: &Database,
    id: &str,
    new: &NewService,
) -> Result<Option<Service>, SunleadError> {
    let id = id.to_string();
    let new = new.clone();
    let features = encode_features(&new.features)?;
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE services SET title = ?1, description = ?2, features = ?3, pricing = ?4,
                 timeline = ?5, display_order = ?6, is_active = ?7,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?8",
                params![
                    new.title,
                    new.description,
                    features,
                    new.pricing,
                    new.timeline,
                    new.display_order,
                    new.is_active,
                    id,
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let mut stmt =
                conn.prepare(&format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?1"))?;
            let service = stmt.query_row(params![id], models::service_from_row)?;
            Ok(Some(service))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a service. Returns whether a row existed.
pub async fn delete_service(db: &Database, id: &str) -> Result<bool, SunleadError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM services WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List projects ordered by `display_order`.
pub async fn list_projects(
    db: &Database,
    include_inactive: bool,
) -> Result<Vec<Project>, SunleadError> {
    db.connection()
        .call(move |conn| {
            let sql = if include_inactive {
                format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY display_order, created_at")
            } else {
                format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects WHERE is_active = 1
                     ORDER BY display_order, created_at"
                )
            };
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], models::project_from_row)?;
            let mut projects = Vec::new();
            for row in rows {
                projects.push(row?);
            }
            Ok(projects)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a project. The store assigns the id and both timestamps.
pub async fn create_project(db: &Database, new: &NewProject) -> Result<Project, SunleadError> {
    let now = models::now();
    let project = Project {
        id: models::new_id(),
        title: new.title.clone(),
        category: new.category.clone(),
        location: new.location.clone(),
        capacity: new.capacity.clone(),
        description: new.description.clone(),
        completion_date: new.completion_date.clone(),
        panel_count: new.panel_count,
        system_type: new.system_type.clone(),
        monthly_savings: new.monthly_savings.clone(),
        co2_reduction: new.co2_reduction.clone(),
        display_order: new.display_order,
        is_active: new.is_active,
        created_at: now,
        updated_at: now,
    };
    let row = project.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO projects (id, title, category, location, capacity, description,
                 completion_date, panel_count, system_type, monthly_savings, co2_reduction,
                 display_order, is_active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                params![
                    row.id,
                    row.title,
                    row.category,
                    row.location,
                    row.capacity,
                    row.description,
                    row.completion_date,
                    row.panel_count,
                    row.system_type,
                    row.monthly_savings,
                    row.co2_reduction,
                    row.display_order,
                    row.is_active,
                    models::format_timestamp(row.created_at),
                    models::format_timestamp(row.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(project)
}

/// Replace a project's fields, refreshing `updated_at` server-side.
/// Returns the refreshed row, or `None` if the id is unknown.
pub async fn update_project(
    db: &Database,
    id: &str,
    new: &NewProject,
) -> Result<Option<Project>, SunleadError> {
    let id = id.to_string();
    let new = new.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE projects SET title = ?1, category = ?2, location = ?3, capacity = ?4,
                 description = ?5, completion_date = ?6, panel_count = ?7, system_type = ?8,
                 monthly_savings = ?9, co2_reduction = ?10, display_order = ?11, is_active = ?12,
                 updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?13",
                params![
                    new.title,
                    new.category,
                    new.location,
                    new.capacity,
                    new.description,
                    new.completion_date,
                    new.panel_count,
                    new.system_type,
                    new.monthly_savings,
                    new.co2_reduction,
                    new.display_order,
                    new.is_active,
                    id,
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let mut stmt =
                conn.prepare(&format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"))?;
            let project = stmt.query_row(params![id], models::project_from_row)?;
            Ok(Some(project))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a project. Returns whether a row existed.
pub async fn delete_project(db: &Database, id: &str) -> Result<bool, SunleadError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
