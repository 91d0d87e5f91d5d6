// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Free-text normalization for collected field values.

/// Normalize a property-type reply to one of the three canonical labels.
///
/// Accepts the numeric menu choice ("1"/"2"/"3", anywhere in the reply) or
/// a keyword match, checked in order: Residential, Commercial, Industrial.
/// Anything unrecognized is kept verbatim so no information is lost.
pub fn normalize_property_type(value: &str) -> String {
    let lower = value.to_lowercase();
    if value.contains('1') || lower.contains("residential") || lower.contains("home") {
        "Residential".to_string()
    } else if value.contains('2') || lower.contains("commercial") || lower.contains("office") {
        "Commercial".to_string()
    } else if value.contains('3') || lower.contains("industrial") || lower.contains("factory") {
        "Industrial".to_string()
    } else {
        value.to_string()
    }
}
