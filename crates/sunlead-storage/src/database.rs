// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes; readers in other
//! processes are fine under WAL, but this handle must stay the only writer.

use tokio_rusqlite::Connection;
use tracing::debug;

use sunlead_core::SunleadError;

use crate::migrations::run_migrations;

/// Handle to the SQLite database.
///
/// Opening runs pending migrations and applies the per-connection PRAGMAs.
/// Cloned freely via [`Database::connection`]; all calls funnel into one
/// background thread.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if necessary) the database at `path`.
    ///
    /// Parent directories are created first. Migrations run on a short-lived
    /// blocking connection because refinery needs `&mut rusqlite::Connection`;
    /// the async handle is opened afterwards.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, SunleadError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| SunleadError::Store {
                message: format!("cannot create database directory: {e}"),
                source: Some(Box::new(e)),
            })?;
        }

        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), SunleadError> {
            let mut conn =
                rusqlite::Connection::open(&migrate_path).map_err(|e| SunleadError::Store {
                    message: format!("cannot open database: {e}"),
                    source: Some(Box::new(e)),
                })?;
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL;")
                    .map_err(|e| SunleadError::Store {
                        message: format!("cannot enable WAL mode: {e}"),
                        source: Some(Box::new(e)),
                    })?;
            }
            run_migrations(&mut conn)
        })
        .await
        .map_err(|e| SunleadError::Store {
            message: format!("migration task failed: {e}"),
            source: Some(Box::new(e)),
        })??;

        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
            }
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database open, migrations applied");
        Ok(Self { conn })
    }

    /// The shared async connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL. The background thread itself stops when the last
    /// clone of the handle is dropped.
    pub async fn close(&self) -> Result<(), SunleadError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the shared error type.
///
/// The message ends up user-visible when a quote submission fails, so it is
/// the error's own Display form with no path or internal detail prepended.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> SunleadError {
    SunleadError::Store {
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}
