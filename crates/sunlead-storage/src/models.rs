// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types and row mapping for storage entities.
//!
//! The canonical types are defined in `sunlead-core::types` for use across
//! store trait boundaries. This module re-exports them and keeps the
//! column-order-sensitive row mappers in one place.

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

pub use sunlead_core::types::{
    Lead, LeadId, LeadSource, LeadStatus, NewLead, NewProject, NewService, Project, Service,
};

/// Column list every `leads` SELECT uses. Order must match [`lead_from_row`].
pub(crate) const LEAD_COLUMNS: &str = "id, name, phone, email, property_type, system_size, \
     budget, timeline, roof_type, message, source, status, created_at, updated_at";

/// Column list every `services` SELECT uses. Order must match [`service_from_row`].
pub(crate) const SERVICE_COLUMNS: &str =
    "id, title, description, features, pricing, timeline, display_order, is_active, \
     created_at, updated_at";

/// Column list every `projects` SELECT uses. Order must match [`project_from_row`].
pub(crate) const PROJECT_COLUMNS: &str =
    "id, title, category, location, capacity, description, completion_date, panel_count, \
     system_type, monthly_savings, co2_reduction, display_order, is_active, created_at, \
     updated_at";

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Timestamps are stored as TEXT in the same shape SQLite's
/// `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')` produces, so rows written from
/// Rust and rows touched server-side sort and parse identically.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Current time truncated to milliseconds, the precision the TEXT column
/// keeps. Structs built from this value equal their own re-fetch.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub(crate) fn parse_timestamp(idx: usize, raw: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a TEXT column into any `FromStr` type (the strum-backed enums).
pub(crate) fn parse_column<T>(idx: usize, raw: &str) -> Result<T, rusqlite::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn lead_from_row(row: &Row<'_>) -> Result<Lead, rusqlite::Error> {
    let source: String = row.get(10)?;
    let status: String = row.get(11)?;
    let created_at: String = row.get(12)?;
    let updated_at: String = row.get(13)?;
    Ok(Lead {
        id: LeadId(row.get(0)?),
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        property_type: row.get(4)?,
        system_size: row.get(5)?,
        budget: row.get(6)?,
        timeline: row.get(7)?,
        roof_type: row.get(8)?,
        message: row.get(9)?,
        source: parse_column(10, &source)?,
        status: parse_column(11, &status)?,
        created_at: parse_timestamp(12, &created_at)?,
        updated_at: parse_timestamp(13, &updated_at)?,
    })
}

pub(crate) fn service_from_row(row: &Row<'_>) -> Result<Service, rusqlite::Error> {
    let features_json: String = row.get(3)?;
    let features: Vec<String> = serde_json::from_str(&features_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;
    Ok(Service {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        features,
        pricing: row.get(4)?,
        timeline: row.get(5)?,
        display_order: row.get(6)?,
        is_active: row.get(7)?,
        created_at: parse_timestamp(8, &created_at)?,
        updated_at: parse_timestamp(9, &updated_at)?,
    })
}

pub(crate) fn project_from_row(row: &Row<'_>) -> Result<Project, rusqlite::Error> {
    let created_at: String = row.get(13)?;
    let updated_at: String = row.get(14)?;
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        location: row.get(3)?,
        capacity: row.get(4)?,
        description: row.get(5)?,
        completion_date: row.get(6)?,
        panel_count: row.get(7)?,
        system_type: row.get(8)?,
        monthly_savings: row.get(9)?,
        co2_reduction: row.get(10)?,
        display_order: row.get(11)?,
        is_active: row.get(12)?,
        created_at: parse_timestamp(13, &created_at)?,
        updated_at: parse_timestamp(14, &updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_roundtrips_through_text() {
        let stamp = now();
        let text = format_timestamp(stamp);
        let parsed = parse_timestamp(0, &text).unwrap();
        assert_eq!(parsed, stamp);
    }

    #[test]
    fn timestamp_matches_sqlite_strftime_shape() {
        let text = format_timestamp(now());
        assert_eq!(text.len(), "2026-01-01T00:00:00.000Z".len());
        assert!(text.ends_with('Z'));
        assert_eq!(&text[10..11], "T");
    }

    #[test]
    fn parse_column_reads_strum_enums() {
        let source: LeadSource = parse_column(0, "chatbot").unwrap();
        assert_eq!(source, LeadSource::Chatbot);
        let status: LeadStatus = parse_column(0, "contacted").unwrap();
        assert_eq!(status, LeadStatus::Contacted);
    }

    #[test]
    fn parse_column_rejects_unknown_values() {
        let result: Result<LeadStatus, _> = parse_column(11, "archived");
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(11, _, _))
        ));
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp(12, "yesterday").is_err());
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(new_id(), new_id());
    }
}
