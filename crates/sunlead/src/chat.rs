// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sunlead chat` command implementation.
//!
//! Launches an interactive chat REPL with colored output, readline
//! history, and the same typing rhythm as the web widget: each reply is
//! held back for its typing delay behind a transient indicator. Captured
//! quotes land in the same SQLite store the gateway writes to.

use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use sunlead_chat::{BotReply, ChatSession};
use sunlead_config::SunleadConfig;
use sunlead_core::error::SunleadError;
use sunlead_core::{LeadStore, StoreAdapter};
use sunlead_storage::SqliteStorage;

/// Runs the `sunlead chat` interactive REPL.
///
/// Creates one chat session against the configured store, prompts for
/// input, and prints bot replies once their typing delay has elapsed.
pub async fn run_chat(config: SunleadConfig) -> Result<(), SunleadError> {
    // Initialize storage.
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    let store: Arc<dyn LeadStore + Send + Sync> = storage.clone();

    let mut session = ChatSession::new(store, config.site.clone(), &config.chat);

    // Set up readline editor.
    let mut rl = DefaultEditor::new()
        .map_err(|e| SunleadError::Internal(format!("failed to initialize readline: {e}")))?;

    // Print welcome message.
    println!("{}", "sunlead chat".bold().green());
    println!("Type {} to exit.\n", "/quit".yellow());

    if let Some(reply) = session.greet() {
        deliver(&reply).await;
    }
    print_quick_replies();

    // REPL loop.
    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                for reply in session.handle_input(trimmed).await {
                    deliver(&reply).await;
                }
                if !session.is_collecting() {
                    print_quick_replies();
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    // Clean up: checkpoint and close the store. Dropping the session
    // discards any half-collected draft, same as closing the widget.
    storage.shutdown().await?;

    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Prints one bot reply, holding it back for its typing delay behind a
/// transient "typing..." indicator.
async fn deliver(reply: &BotReply) {
    if !reply.typing_delay.is_zero() {
        print!("{}", "typing...".dimmed());
        let _ = std::io::Write::flush(&mut std::io::stdout());
        tokio::time::sleep(reply.typing_delay).await;
        print!("\r          \r");
    }
    println!("{} {}", "bot:".cyan(), reply.text);
}

/// Prints the quick-reply phrases a visitor could click in the widget.
fn print_quick_replies() {
    println!("{}\n", ChatSession::quick_replies().join(" | ").dimmed());
}
