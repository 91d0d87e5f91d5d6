// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword routing for FAQ mode.
//!
//! Incoming text is lower-cased and scanned against an ordered table of
//! keyword sets; the first set with a match wins. Matching is substring
//! containment, not word-boundary tokenization, so a trigger embedded in
//! a longer word still fires ("costume" routes like "cost").

/// Canned conversation topics the bot can answer without collecting a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// Switches the session into lead-collection mode.
    QuoteIntake,
    /// Overview of offered services.
    Services,
    /// Residential rooftop installations.
    Residential,
    /// Commercial and industrial systems.
    Commercial,
    /// Panel cleaning and repair services.
    Maintenance,
    /// Savings and benefit figures.
    Savings,
    /// Location, phone numbers, and email.
    Contact,
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Topic::QuoteIntake => write!(f, "quote_intake"),
            Topic::Services => write!(f, "services"),
            Topic::Residential => write!(f, "residential"),
            Topic::Commercial => write!(f, "commercial"),
            Topic::Maintenance => write!(f, "maintenance"),
            Topic::Savings => write!(f, "savings"),
            Topic::Contact => write!(f, "contact"),
        }
    }
}

/// Priority-ordered routing table. Earlier rows shadow later ones, so a
/// message matching both "cost" and "service" is a quote request.
const TOPIC_KEYWORDS: &[(&[&str], Topic)] = &[
    (&["quote", "price", "cost"], Topic::QuoteIntake),
    (&["service", "what do you offer"], Topic::Services),
    (&["residential", "home", "house"], Topic::Residential),
    (&["commercial", "business", "factory"], Topic::Commercial),
    (&["maintenance", "cleaning", "repair"], Topic::Maintenance),
    (&["saving", "benefit", "advantage"], Topic::Savings),
    (&["location", "address", "contact"], Topic::Contact),
];

/// Route one line of user text to the first matching topic.
///
/// Returns `None` when no keyword matches; the caller answers with the
/// default menu in that case.
pub fn route(message: &str) -> Option<Topic> {
    let lower = message.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, topic)| *topic)
}
