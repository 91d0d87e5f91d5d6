// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned bot reply texts.
//!
//! Every informational answer the bot can give lives here, keyed by topic
//! or by the field the collection flow asks for next. Contact details are
//! interpolated from [`SiteConfig`] so a deployment never ships another
//! company's phone number.

use sunlead_config::SiteConfig;
use sunlead_core::FieldId;
use sunlead_engine::{FlowDefinition, LeadDraft};

use crate::topics::Topic;

/// Quick-reply shortcuts offered alongside the greeting. Clicking one is
/// equivalent to typing the phrase.
pub const QUICK_REPLIES: &[&str] =
    &["Get a quote", "Tell me about services", "What are the savings?"];

/// Opening message shown when a chat session starts.
pub fn greeting() -> String {
    "Hello! I'm your Solar Assistant. I can help you with:\n\n\
     1. Information about our services\n\
     2. Get a free quote\n\
     3. Answer questions about solar energy\n\n\
     What would you like to know?"
        .to_string()
}

/// Fallback menu when no topic keyword matches.
pub fn default_menu() -> String {
    "I'm here to help! You can ask me about:\n\n\
     - Our solar services\n\
     - Pricing and quotes\n\
     - Installation process\n\
     - Maintenance services\n\
     - Government subsidies\n\
     - Energy savings\n\n\
     Or type 'quote' to get a free quote!"
        .to_string()
}

/// Canned answer for an informational topic.
///
/// [`Topic::QuoteIntake`] has no canned answer; it switches the session
/// into collection mode and the first field prompt speaks instead.
pub fn topic_reply(topic: Topic, site: &SiteConfig) -> String {
    match topic {
        Topic::QuoteIntake => field_prompt(FieldId::Name, &LeadDraft::default()),
        Topic::Services => "We offer comprehensive solar solutions:\n\n\
             - Residential Rooftop Solar\n\
             - Commercial Solar Solutions\n\
             - Solar Panel Maintenance\n\
             - System Design & Consultation\n\
             - Energy Efficiency Solutions\n\
             - Solar Battery Storage\n\n\
             Would you like details about any specific service?"
            .to_string(),
        Topic::Residential => "Our Residential Solar Solutions include:\n\n\
             - Custom rooftop installations\n\
             - Government subsidy support (up to ₹78,000)\n\
             - Net metering setup\n\
             - 25-year warranty\n\
             - Starting from ₹52,000 per kW\n\n\
             Installation takes 15-20 days. Would you like a free quote?"
            .to_string(),
        Topic::Commercial => "Our Commercial Solar Solutions offer:\n\n\
             - Systems from 10kW to 1MW+\n\
             - Tax benefits (Accelerated Depreciation)\n\
             - ROI in 3-5 years\n\
             - Starting from ₹45,000 per kW\n\
             - Flexible financing options\n\n\
             Perfect for offices, factories, warehouses, and retail spaces. Interested in a quote?"
            .to_string(),
        Topic::Maintenance => "Our Maintenance Services include:\n\n\
             - Professional panel cleaning\n\
             - Performance monitoring\n\
             - Electrical health checks\n\
             - Fault troubleshooting\n\
             - ₹15-25 per panel or AMC from ₹5,000/year\n\n\
             Same-day service available! Want to schedule a visit?"
            .to_string(),
        Topic::Savings => "Solar Energy Benefits:\n\n\
             - Reduce bills by up to 90%\n\
             - Reduce carbon footprint\n\
             - Energy independence\n\
             - Increase property value\n\
             - Government subsidies available\n\
             - Protection from rising electricity costs\n\n\
             Jaipur gets 300+ sunny days - perfect for solar! Ready to get started?"
            .to_string(),
        Topic::Contact => {
            let phones = site.phones.join("\n");
            format!(
                "Location: {}\n\nPhone:\n{}\n\nEmail:\n{}\n\n\
                 We serve the whole region. Would you like to schedule a free site visit?",
                site.city, phones, site.email
            )
        }
    }
}

/// Prompt asking for the next field the collection flow needs.
///
/// Prompts past the first one acknowledge the previous answer, so the one
/// for `Email` greets the visitor by the name just collected.
pub fn field_prompt(field: FieldId, draft: &LeadDraft) -> String {
    match field {
        FieldId::Name => "Great! I'd love to help you get a quote. \
             Let me collect some information.\n\nFirst, what's your name?"
            .to_string(),
        FieldId::Email => format!(
            "Nice to meet you, {}!\n\nWhat's your email address?",
            draft.name
        ),
        FieldId::Phone => "Great! What's your phone number?".to_string(),
        FieldId::PropertyType => "Perfect! What type of property do you have?\n\n\
             1. Residential (Home/Villa)\n\
             2. Commercial (Office/Shop)\n\
             3. Industrial (Factory/Warehouse)"
            .to_string(),
        FieldId::SystemSize => {
            let buckets = FlowDefinition::conversation()
                .choices(FieldId::SystemSize)
                .iter()
                .map(|size| format!("- {size}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Excellent! What system size are you interested in?\n\n{buckets}")
        }
        FieldId::Message => {
            "Almost done! Any specific requirements or questions? (Or type 'none')".to_string()
        }
        // The conversational flow never asks for these; the wizard collects
        // them from pick lists instead.
        FieldId::Budget | FieldId::Timeline | FieldId::RoofType => String::new(),
    }
}

/// Confirmation after a lead is persisted.
pub fn submit_success(name: &str) -> String {
    format!(
        "Thank you, {name}!\n\n\
         Your quote request has been submitted successfully. \
         Our team will contact you within 24 hours.\n\n\
         In the meantime, feel free to explore our website or ask me any questions!"
    )
}

/// Apology after the store rejects a lead; carries the store's reason
/// verbatim plus a direct phone number as fallback.
pub fn submit_failure(reason: &str, site: &SiteConfig) -> String {
    let phone = site.phones.first().map(String::as_str).unwrap_or_default();
    format!("I'm sorry, {reason} Please try again or contact us directly at {phone}.")
}
