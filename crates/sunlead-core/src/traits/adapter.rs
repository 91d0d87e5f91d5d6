// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait all store backends must implement.

use async_trait::async_trait;

use crate::error::SunleadError;
use crate::types::StoreHealth;

/// Identity, lifecycle, and health checks for a store backend.
///
/// The flow engine only ever sees [`crate::traits::LeadStore`]; this base
/// trait exists so the binary can initialize, probe, and shut down any
/// backend uniformly.
#[async_trait]
pub trait StoreAdapter: Send + Sync + 'static {
    /// Human-readable name of this backend instance.
    fn name(&self) -> &str;

    /// Opens connections and runs pending migrations. Must be called
    /// before any query operation.
    async fn initialize(&self) -> Result<(), SunleadError>;

    /// Probes the backend and reports its current status.
    async fn health_check(&self) -> Result<StoreHealth, SunleadError>;

    /// Flushes pending writes and releases held resources.
    async fn shutdown(&self) -> Result<(), SunleadError>;
}
