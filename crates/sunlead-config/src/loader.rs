// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sunlead.toml` > `~/.config/sunlead/sunlead.toml`
//! > `/etc/sunlead/sunlead.toml` with environment variable overrides via the
//! `SUNLEAD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SunleadConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sunlead/sunlead.toml` (system-wide)
/// 3. `~/.config/sunlead/sunlead.toml` (user XDG config)
/// 4. `./sunlead.toml` (local directory)
/// 5. `SUNLEAD_*` environment variables
pub fn load_config() -> Result<SunleadConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SunleadConfig::default()))
        .merge(Toml::file("/etc/sunlead/sunlead.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sunlead/sunlead.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sunlead.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SunleadConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SunleadConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SunleadConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SunleadConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SUNLEAD_GATEWAY_ADMIN_TOKEN` must map
/// to `gateway.admin_token`, not `gateway.admin.token`.
fn env_provider() -> Env {
    Env::prefixed("SUNLEAD_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SUNLEAD_GATEWAY_ADMIN_TOKEN -> "gateway_admin_token"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("site_", "site.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("chat_", "chat.", 1);
        mapped.into()
    })
}
