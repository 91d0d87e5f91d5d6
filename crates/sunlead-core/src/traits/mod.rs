// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store trait definitions.
//!
//! Both stores extend the [`StoreAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod catalog;
pub mod lead_store;

pub use adapter::StoreAdapter;
pub use catalog::CatalogStore;
pub use lead_store::LeadStore;
