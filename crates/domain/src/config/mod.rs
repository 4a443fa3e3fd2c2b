mod llm;
mod logging;
mod storage;

pub use llm::*;
pub use logging::*;
pub use storage::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let provider = &self.llm.provider;

        if provider.id.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "llm.provider.id".into(),
                message: "provider id must not be empty".into(),
            });
        }
        if provider.base_url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "llm.provider.base_url".into(),
                message: "provider base_url must not be empty".into(),
            });
        }

        // Warn when there is no way at all to find a credential.
        let auth = &provider.auth;
        let has_keychain = auth.service.is_some() && auth.account.is_some();
        if auth.key.is_none() && auth.env.is_none() && !has_keychain {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "llm.provider.auth".into(),
                message: "no credential source configured (key, env, or service+account)".into(),
            });
        }
        if auth.key.is_some() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "llm.provider.auth.key".into(),
                message: "plaintext API key in config; prefer env or keychain".into(),
            });
        }

        if self.llm.timeout_secs == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "llm.timeout_secs".into(),
                message: "timeout must be greater than 0".into(),
            });
        }

        for (field, temp) in [
            ("llm.report.temperature", self.llm.report.temperature),
            ("llm.chat.temperature", self.llm.chat.temperature),
        ] {
            if !(0.0..=2.0).contains(&temp) {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: field.into(),
                    message: format!("temperature {temp} outside 0.0..=2.0"),
                });
            }
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "storage.data_dir".into(),
                message: "data_dir must not be empty".into(),
            });
        }

        errors
    }
}
