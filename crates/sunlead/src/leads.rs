// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sunlead leads` command implementation.
//!
//! Direct-to-store lead management for the installer: list captured
//! leads, move them through the pipeline, and delete junk rows. Operates
//! on the same SQLite database the gateway writes to.

use std::io::IsTerminal;

use colored::Colorize;
use sunlead_config::SunleadConfig;
use sunlead_core::error::SunleadError;
use sunlead_core::types::{Lead, LeadId, LeadStatus};
use sunlead_core::{LeadStore, StoreAdapter};
use sunlead_storage::SqliteStorage;

use crate::LeadsCommand;

/// Runs a `sunlead leads` subcommand against the configured store.
pub async fn run_leads(config: SunleadConfig, command: LeadsCommand) -> Result<(), SunleadError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;

    let outcome = match command {
        LeadsCommand::List { status } => list_leads(&storage, status).await,
        LeadsCommand::SetStatus { id, status } => set_status(&storage, id, status).await,
        LeadsCommand::Delete { id } => delete_lead(&storage, id).await,
    };

    storage.shutdown().await?;
    outcome
}

async fn list_leads(
    store: &SqliteStorage,
    status: Option<LeadStatus>,
) -> Result<(), SunleadError> {
    let leads = store.list_leads(status).await?;
    if leads.is_empty() {
        match status {
            Some(s) => println!("no {s} leads"),
            None => println!("no leads captured yet"),
        }
        return Ok(());
    }

    let use_color = std::io::stdout().is_terminal();
    for lead in &leads {
        print_lead(lead, use_color);
    }
    println!();
    println!("  {} lead(s)", leads.len());
    Ok(())
}

async fn set_status(
    store: &SqliteStorage,
    id: String,
    status: LeadStatus,
) -> Result<(), SunleadError> {
    let lead = store.update_lead_status(&LeadId(id), status).await?;
    println!("{} is now {}", lead.id, lead.status);
    Ok(())
}

async fn delete_lead(store: &SqliteStorage, id: String) -> Result<(), SunleadError> {
    let id = LeadId(id);
    store.delete_lead(&id).await?;
    println!("deleted {id}");
    Ok(())
}

/// Prints one lead as an indented single line, with the status colored
/// when stdout is a terminal.
fn print_lead(lead: &Lead, use_color: bool) {
    let status = format!("{:<10}", lead.status.to_string());
    let status = if use_color {
        match lead.status {
            LeadStatus::New => status.yellow().to_string(),
            LeadStatus::Contacted => status.cyan().to_string(),
            LeadStatus::Completed => status.green().to_string(),
            LeadStatus::Cancelled => status.red().to_string(),
        }
    } else {
        status
    };
    println!("  {}  {}{}", lead.id, status, format_lead_summary(lead));
}

/// The uncolored tail of a list line: name, contact, source, capture time.
fn format_lead_summary(lead: &Lead) -> String {
    format!(
        "{}  <{}>  {}  {}  {}",
        lead.name,
        lead.email,
        lead.phone,
        lead.source,
        lead.created_at.format("%Y-%m-%d %H:%M"),
    )
}
