use sg_domain::config::{Config, ConfigSeverity};
use sg_providers::util::{keychain_fallback_env_name, mask_secret, store_in_keychain};

use crate::cli::input;

/// Parse and validate the config, printing any issues.
///
/// Returns `false` when errors are found.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = config.validate();

    if issues.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }

    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    for issue in &issues {
        println!("{issue}");
    }

    println!(
        "\n{} error(s), {} warning(s) in {config_path}",
        error_count, warning_count,
    );

    error_count == 0
}

/// Dump the resolved config (with all defaults filled in) as TOML.
pub fn show(config: &Config) -> anyhow::Result<()> {
    let output = toml::to_string_pretty(config)
        .map_err(|e| anyhow::anyhow!("failed to serialize config: {e}"))?;
    print!("{output}");
    Ok(())
}

/// Prompt for the API key and store it in the OS keychain under the
/// `[llm.provider.auth]` service/account.
pub fn set_secret(config: &Config) -> anyhow::Result<()> {
    let auth = &config.llm.provider.auth;
    let (Some(service), Some(account)) = (&auth.service, &auth.account) else {
        anyhow::bail!("set both 'service' and 'account' in [llm.provider.auth] first");
    };

    let secret = input::password("API key: ")?;
    let secret = secret.trim();
    if secret.is_empty() {
        anyhow::bail!("no key entered");
    }

    if let Err(e) = store_in_keychain(service, account, secret) {
        eprintln!("Keychain unavailable: {e}");
        eprintln!(
            "On headless systems, export {} instead.",
            keychain_fallback_env_name(service, account)
        );
        return Err(e.into());
    }
    println!("Stored {} for {service}/{account}", mask_secret(secret));
    Ok(())
}
