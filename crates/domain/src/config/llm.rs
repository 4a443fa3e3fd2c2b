use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Generation service
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// HTTP client timeout. This is the only timeout applied to a report
    /// request or a chat stream.
    #[serde(default = "d_120")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            provider: ProviderConfig::default(),
            report: ReportConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "d_provider_id")]
    pub id: String,
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default = "d_base_url")]
    pub base_url: String,
    #[serde(default = "d_model")]
    pub default_model: Option<String>,
    #[serde(default = "d_auth")]
    pub auth: AuthConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: d_provider_id(),
            kind: ProviderKind::Google,
            base_url: d_base_url(),
            default_model: d_model(),
            auth: d_auth(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Google,
}

/// Where the API credential comes from.
///
/// Resolution order: `key`, then keychain (`service` + `account`), then
/// `env`, then the keychain headless fallback env var.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Env var containing the key.
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (for config-only setups; prefer env or keychain).
    #[serde(default)]
    pub key: Option<String>,
    /// Keychain service name (e.g., "strategos").
    #[serde(default)]
    pub service: Option<String>,
    /// Keychain account name (e.g., "gemini-api-key").
    #[serde(default)]
    pub account: Option<String>,
}

/// Settings for the one-shot structured report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Model override; `None` uses the provider default.
    #[serde(default)]
    pub model: Option<String>,
    /// Kept low so repeated submissions of the same answers stay consistent.
    #[serde(default = "d_report_temperature")]
    pub temperature: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: d_report_temperature(),
        }
    }
}

/// Settings for the follow-up chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "d_chat_temperature")]
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: d_chat_temperature(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_120() -> u64 {
    120
}
fn d_provider_id() -> String {
    "google".into()
}
fn d_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn d_model() -> Option<String> {
    Some("gemini-2.5-flash".into())
}
fn d_auth() -> AuthConfig {
    AuthConfig {
        env: Some("GEMINI_API_KEY".into()),
        key: None,
        service: Some("strategos".into()),
        account: Some("gemini-api-key".into()),
    }
}
fn d_report_temperature() -> f32 {
    0.3
}
fn d_chat_temperature() -> f32 {
    0.5
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_cooler_than_chat() {
        let config = LlmConfig::default();
        assert!((config.report.temperature - 0.3).abs() < f32::EPSILON);
        assert!((config.chat.temperature - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_report_section_keeps_default_temperature() {
        let json = r#"{ "report": { "model": "gemini-2.5-pro" } }"#;
        let config: LlmConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.report.model.as_deref(), Some("gemini-2.5-pro"));
        assert!((config.report.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn provider_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ProviderKind::Google).unwrap();
        assert_eq!(json, r#""google""#);
    }

    #[test]
    fn auth_config_default_is_empty() {
        let auth = AuthConfig::default();
        assert!(auth.env.is_none());
        assert!(auth.key.is_none());
        assert!(auth.service.is_none());
        assert!(auth.account.is_none());
    }

    #[test]
    fn provider_default_reads_gemini_env() {
        let provider = ProviderConfig::default();
        assert_eq!(provider.auth.env.as_deref(), Some("GEMINI_API_KEY"));
        assert_eq!(provider.default_model.as_deref(), Some("gemini-2.5-flash"));
    }
}
