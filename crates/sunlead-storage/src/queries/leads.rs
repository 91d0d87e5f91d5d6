// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead CRUD operations.
//!
//! These functions return raw presence (`Option`, `bool`) for missing rows;
//! the adapter decides which of those become `NotFound` errors.

use rusqlite::params;

use sunlead_core::SunleadError;

use crate::database::Database;
use crate::models::{self, LEAD_COLUMNS, Lead, LeadId, LeadStatus, NewLead};

/// Insert a completed draft. The store assigns the id, the initial `new`
/// status, and both timestamps; the returned record equals a re-fetch.
pub async fn create_lead(db: &Database, new: &NewLead) -> Result<Lead, SunleadError> {
    let now = models::now();
    let lead = Lead {
        id: LeadId(models::new_id()),
        name: new.name.clone(),
        phone: new.phone.clone(),
        email: new.email.clone(),
        property_type: new.property_type.clone(),
        system_size: new.system_size.clone(),
        budget: new.budget.clone(),
        timeline: new.timeline.clone(),
        roof_type: new.roof_type.clone(),
        message: new.message.clone(),
        source: new.source,
        status: LeadStatus::New,
        created_at: now,
        updated_at: now,
    };
    let row = lead.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO leads (id, name, phone, email, property_type, system_size, budget,
                 timeline, roof_type, message, source, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    row.id.0,
                    row.name,
                    row.phone,
                    row.email,
                    row.property_type,
                    row.system_size,
                    row.budget,
                    row.timeline,
                    row.roof_type,
                    row.message,
                    row.source.to_string(),
                    row.status.to_string(),
                    models::format_timestamp(row.created_at),
                    models::format_timestamp(row.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(lead)
}

/// Get a lead by id.
pub async fn get_lead(db: &Database, id: &LeadId) -> Result<Option<Lead>, SunleadError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], models::lead_from_row);
            match result {
                Ok(lead) => Ok(Some(lead)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List leads newest-first, optionally filtered by status.
pub async fn list_leads(
    db: &Database,
    status: Option<LeadStatus>,
) -> Result<Vec<Lead>, SunleadError> {
    db.connection()
        .call(move |conn| {
            let mut leads = Vec::new();
            match status {
                Some(status) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LEAD_COLUMNS} FROM leads WHERE status = ?1
                         ORDER BY created_at DESC"
                    ))?;
                    let rows =
                        stmt.query_map(params![status.to_string()], models::lead_from_row)?;
                    for row in rows {
                        leads.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LEAD_COLUMNS} FROM leads ORDER BY created_at DESC"
                    ))?;
                    let rows = stmt.query_map([], models::lead_from_row)?;
                    for row in rows {
                        leads.push(row?);
                    }
                }
            }
            Ok(leads)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Move a lead to a new status, refreshing `updated_at` server-side.
/// Returns the refreshed row, or `None` if the id is unknown.
pub async fn update_lead_status(
    db: &Database,
    id: &LeadId,
    status: LeadStatus,
) -> Result<Option<Lead>, SunleadError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE leads SET status = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?2",
                params![status.to_string(), id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            let mut stmt =
                conn.prepare(&format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"))?;
            let lead = stmt.query_row(params![id], models::lead_from_row)?;
            Ok(Some(lead))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a lead. Returns whether a row existed.
pub async fn delete_lead(db: &Database, id: &LeadId) -> Result<bool, SunleadError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM leads WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
