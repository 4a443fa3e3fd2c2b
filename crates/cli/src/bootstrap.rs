//! Process bootstrap: tracing, credential resolution, and vault unlock.

use std::sync::Arc;

use sg_domain::config::{Config, ConfigSeverity, LoggingConfig};
use sg_domain::error::Error;
use sg_providers::LlmProvider;
use sg_survey::access::AccessState;
use sg_survey::{FileKvStore, Vault};
use tracing_subscriber::EnvFilter;

use crate::cli::input;

/// Everything a vault command needs once startup has succeeded.
pub struct Runtime {
    pub config: Config,
    pub provider: Arc<dyn LlmProvider>,
    pub vault: Vault,
}

/// Initialize tracing from `[logging]`. `RUST_LOG` overrides the filter.
pub fn init_tracing(cfg: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cfg.json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

/// Validate config, resolve the API credential, and open the vault.
///
/// Nothing touches the vault until the credential resolves.
pub fn open(config: Config) -> anyhow::Result<Runtime> {
    let errors: Vec<_> = config
        .validate()
        .into_iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .collect();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        anyhow::bail!("config has {} error(s); run `strategos config validate`", errors.len());
    }

    let provider = sg_providers::from_config(&config.llm)?;
    tracing::debug!(provider = provider.provider_id(), "provider ready");

    let store = Arc::new(FileKvStore::new(config.storage.data_dir.clone()));
    let vault = Vault::open(store)?;
    tracing::debug!(state = %vault.state(), data_dir = %config.storage.data_dir.display(), "vault opened");

    Ok(Runtime {
        config,
        provider,
        vault,
    })
}

/// Drive the vault to `Authenticated`, prompting on the terminal.
///
/// Registration and login re-prompt until they succeed. Declining the
/// legal terms is an error.
pub fn unlock(vault: &mut Vault) -> anyhow::Result<()> {
    loop {
        match vault.state() {
            AccessState::Authenticated => return Ok(()),
            AccessState::NeedsRegistration => register_interactive(vault)?,
            AccessState::NeedsLogin => {
                let password = input::password("Password: ")?;
                if password.is_empty() {
                    eprintln!("Please enter your password.");
                    continue;
                }
                if !vault.login(&password)? {
                    eprintln!("Incorrect password. Please try again.");
                }
            }
            AccessState::NeedsLegal => {
                if !accept_legal_interactive(vault)? {
                    anyhow::bail!("the legal terms must be accepted to continue");
                }
            }
            AccessState::Loading => anyhow::bail!("vault is still loading"),
        }
    }
}

/// Prompt for a new password until registration succeeds.
pub fn register_interactive(vault: &mut Vault) -> anyhow::Result<()> {
    eprintln!("Create a password to protect your answers on this device.");
    loop {
        let password = input::password("New password: ")?;
        let confirmation = input::password("Confirm password: ")?;
        match vault.register(&password, &confirmation) {
            Ok(()) => {
                eprintln!("Password created.");
                return Ok(());
            }
            Err(Error::Validation(msg)) => eprintln!("{msg}"),
            Err(e) => return Err(e.into()),
        }
    }
}

fn accept_legal_interactive(vault: &mut Vault) -> anyhow::Result<bool> {
    let today = chrono::Local::now().date_naive();
    println!("{}", sg_survey::legal::agreement_text(today));
    println!();
    let agreed = input::confirm(
        "I have read, understood, and agree to the Terms of Service and Privacy Policy.",
    )?;
    if agreed {
        vault.accept_legal()?;
    }
    Ok(agreed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_domain::config::AuthConfig;

    fn config_in(dir: &std::path::Path, auth: AuthConfig) -> Config {
        let mut config = Config::default();
        config.storage.data_dir = dir.join("vault");
        config.llm.provider.auth = auth;
        config
    }

    #[test]
    fn missing_credential_stops_before_the_vault() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            dir.path(),
            AuthConfig {
                env: Some("STRATEGOS_TEST_UNSET_KEY_7F3A".into()),
                ..Default::default()
            },
        );
        let Err(err) = open(config) else {
            panic!("open succeeded without a credential");
        };
        assert!(err.to_string().contains("no API key"), "{err}");
        assert!(!dir.path().join("vault").exists());
    }

    #[test]
    fn fresh_vault_needs_registration() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            dir.path(),
            AuthConfig {
                key: Some("test-key".into()),
                ..Default::default()
            },
        );
        let rt = open(config).unwrap();
        assert_eq!(rt.vault.state(), AccessState::NeedsRegistration);
        assert_eq!(rt.provider.provider_id(), "google");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(
            dir.path(),
            AuthConfig {
                key: Some("test-key".into()),
                ..Default::default()
            },
        );
        config.llm.timeout_secs = 0;
        let Err(err) = open(config) else {
            panic!("open accepted an invalid config");
        };
        assert!(err.to_string().contains("1 error(s)"));
    }
}
