// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles for the Sunlead workspace.
//!
//! These stores implement the real `sunlead-core` traits against process
//! memory so engine, chat, and gateway tests run fast and deterministic
//! with no SQLite file involved.

pub mod memory_catalog;
pub mod memory_lead_store;

pub use memory_catalog::MemoryCatalogStore;
pub use memory_lead_store::MemoryLeadStore;
