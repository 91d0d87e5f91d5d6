// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sunlead - lead capture and chat assistant for a solar installation business.
//!
//! This is the binary entry point for the Sunlead service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use sunlead_core::types::LeadStatus;

mod chat;
mod leads;
mod serve;

/// Sunlead - lead capture and chat assistant for a solar installation business.
#[derive(Parser, Debug)]
#[command(name = "sunlead", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (skips the XDG hierarchy).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Sunlead gateway server.
    Serve,
    /// Launch an interactive chat session in the terminal.
    Chat,
    /// Inspect and manage captured leads.
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
}

/// Lead management subcommands, run directly against the store.
#[derive(Subcommand, Debug)]
enum LeadsCommand {
    /// List captured leads, newest first.
    List {
        /// Only show leads with this status.
        #[arg(long)]
        status: Option<LeadStatus>,
    },
    /// Update the status of a lead.
    SetStatus {
        /// Lead identifier.
        id: String,
        /// New status (new, contacted, completed, cancelled).
        status: LeadStatus,
    },
    /// Delete a lead.
    Delete {
        /// Lead identifier.
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match &cli.config {
        Some(path) => sunlead_config::load_and_validate_path(path),
        None => sunlead_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            sunlead_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Chat) => chat::run_chat(config).await,
        Some(Commands::Leads { command }) => leads::run_leads(config, command).await,
        None => {
            println!("sunlead: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
