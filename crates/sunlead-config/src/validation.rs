// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty contact details, and sane delays.

use crate::diagnostic::ConfigError;
use crate::model::SunleadConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SunleadConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Validate site identity is not blank
    if config.site.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "site.name must not be empty".to_string(),
        });
    }

    if config.site.phones.is_empty() {
        errors.push(ConfigError::Validation {
            message: "site.phones must list at least one contact number".to_string(),
        });
    }

    for (i, phone) in config.site.phones.iter().enumerate() {
        if phone.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("site.phones[{i}] must not be empty"),
            });
        }
    }

    if config.site.email.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "site.email must not be empty".to_string(),
        });
    }

    // Validate database_path is not empty
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate host is not empty
    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    // Validate host looks like a valid IP or hostname
    if !config.gateway.host.trim().is_empty() {
        let addr = config.gateway.host.trim();
        // Accept valid IPv4, IPv6, or hostname patterns
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{addr}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.port must not be 0".to_string(),
        });
    }

    if config.gateway.session_ttl_secs < 60 {
        errors.push(ConfigError::Validation {
            message: format!(
                "gateway.session_ttl_secs must be at least 60, got {}",
                config.gateway.session_ttl_secs
            ),
        });
    }

    // A blank token would make every admin request fail auth; omitting the
    // key entirely is the supported way to disable admin routes.
    if let Some(token) = &config.gateway.admin_token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "gateway.admin_token must not be blank; omit it to disable admin routes"
                .to_string(),
        });
    }

    if config.chat.typing_delay_ms > 10_000 {
        errors.push(ConfigError::Validation {
            message: format!(
                "chat.typing_delay_ms must be at most 10000, got {}",
                config.chat.typing_delay_ms
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SunleadConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = SunleadConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))));
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut config = SunleadConfig::default();
        config.gateway.port = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("gateway.port"))));
    }

    #[test]
    fn garbage_host_fails_validation() {
        let mut config = SunleadConfig::default();
        config.gateway.host = "not a host!".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("gateway.host"))));
    }

    #[test]
    fn short_session_ttl_fails_validation() {
        let mut config = SunleadConfig::default();
        config.gateway.session_ttl_secs = 5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("session_ttl_secs"))));
    }

    #[test]
    fn blank_admin_token_fails_validation() {
        let mut config = SunleadConfig::default();
        config.gateway.admin_token = Some("   ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("admin_token"))));
    }

    #[test]
    fn missing_admin_token_is_allowed() {
        let mut config = SunleadConfig::default();
        config.gateway.admin_token = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_phone_list_fails_validation() {
        let mut config = SunleadConfig::default();
        config.site.phones.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("site.phones"))));
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = SunleadConfig::default();
        config.gateway.host = "0.0.0.0".to_string();
        config.gateway.port = 3000;
        config.storage.database_path = "/tmp/test.db".to_string();
        config.gateway.admin_token = Some("secret".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn excessive_typing_delay_fails_validation() {
        let mut config = SunleadConfig::default();
        config.chat.typing_delay_ms = 60_000;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("typing_delay_ms"))));
    }

    #[test]
    fn collects_multiple_errors_in_one_pass() {
        let mut config = SunleadConfig::default();
        config.site.name = "  ".to_string();
        config.gateway.port = 0;
        config.storage.database_path = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn partial_toml_fills_remaining_defaults() {
        let toml_str = r#"
[site]
name = "Test Solar Co"
"#;
        let config: SunleadConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.site.name, "Test Solar Co");
        assert_eq!(config.site.city, "Jaipur, Rajasthan, India");
        assert_eq!(config.gateway.port, 8080);
        assert!(config.storage.wal_mode);
    }

    #[test]
    fn phones_array_deserializes_correctly() {
        let toml_str = r#"
[site]
phones = ["+91-1111111111", "+91-2222222222"]

[gateway]
admin_token = "hunter2"
"#;
        let config: SunleadConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.site.phones.len(), 2);
        assert_eq!(config.site.phones[0], "+91-1111111111");
        assert_eq!(config.gateway.admin_token.as_deref(), Some("hunter2"));
        assert!(validate_config(&config).is_ok());
    }
}
