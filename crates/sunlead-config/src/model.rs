// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Sunlead service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Sunlead configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SunleadConfig {
    /// Business identity used in chatbot replies and confirmations.
    #[serde(default)]
    pub site: SiteConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Chatbot presentation settings.
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Business identity configuration. Interpolated into the chatbot's
/// canned replies and the store-failure fallback message.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name of the business.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Service area shown in the contact reply.
    #[serde(default = "default_city")]
    pub city: String,

    /// Contact phone numbers. The first entry doubles as the fallback
    /// number quoted when a quote submission fails.
    #[serde(default = "default_phones")]
    pub phones: Vec<String>,

    /// Contact email address.
    #[serde(default = "default_email")]
    pub email: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            city: default_city(),
            phones: default_phones(),
            email: default_email(),
            log_level: default_log_level(),
        }
    }
}

fn default_site_name() -> String {
    "Seth Sawaliya Solar".to_string()
}

fn default_city() -> String {
    "Jaipur, Rajasthan, India".to_string()
}

fn default_phones() -> Vec<String> {
    vec!["+91-7014235836".to_string(), "+91-9928567308".to_string()]
}

fn default_email() -> String {
    "enterprisessethsawaliya@gmail.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("sunlead").join("sunlead.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("sunlead.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind the server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port for the gateway.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token protecting the admin routes. `None` disables all
    /// admin endpoints (fail-closed).
    #[serde(default)]
    pub admin_token: Option<String>,

    /// Seconds of inactivity before an abandoned capture session is
    /// swept away together with its draft.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            admin_token: None,
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_ttl_secs() -> u64 {
    1800 // 30 minutes
}

/// Chatbot presentation configuration.
///
/// The delays shape perceived typing rhythm only; they never affect
/// field collection or submission order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Milliseconds a bot reply stays "typing" before it is delivered.
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Milliseconds before the opening greeting appears in a new session.
    #[serde(default = "default_greeting_delay_ms")]
    pub greeting_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            greeting_delay_ms: default_greeting_delay_ms(),
        }
    }
}

fn default_typing_delay_ms() -> u64 {
    800
}

fn default_greeting_delay_ms() -> u64 {
    500
}
