use sg_domain::config::{Config, ConfigSeverity};
use sg_providers::util::{mask_secret, resolve_api_key};
use sg_survey::vault::{has_accepted_legal, load_auth};
use sg_survey::FileKvStore;

/// Run all diagnostic checks and print a summary.
///
/// Returns `Ok(true)` when every check passes, `Ok(false)` when at least
/// one check failed.
pub fn run(config: &Config, config_path: &str) -> anyhow::Result<bool> {
    println!("strategos doctor");
    println!("================\n");

    let mut all_passed = true;

    // 1. Config file
    check_config_file(config_path);

    // 2. Config validation
    check_config_validation(config, &mut all_passed);

    // 3. API credential
    check_credential(config, &mut all_passed);

    // 4. Data directory
    check_data_dir(config, &mut all_passed);

    // 5. Vault records
    check_vault(config);

    // Summary
    println!();
    if all_passed {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Review the output above.");
    }

    Ok(all_passed)
}

// ── Individual checks ─────────────────────────────────────────────────

/// A missing file is reported but does not fail; defaults apply.
fn check_config_file(config_path: &str) {
    let exists = std::path::Path::new(config_path).exists();
    print_check(
        "Config file",
        true,
        if exists {
            config_path.to_owned()
        } else {
            format!("{config_path} not found (using defaults)")
        },
    );
}

fn check_config_validation(config: &Config, all_passed: &mut bool) {
    let issues = config.validate();
    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();

    if issues.is_empty() {
        print_check("Config validation", true, "no issues".into());
    } else {
        print_check(
            "Config validation",
            error_count == 0,
            format!("{} issue(s) ({} error(s))", issues.len(), error_count),
        );
        for issue in &issues {
            println!("      {issue}");
        }
        if error_count > 0 {
            *all_passed = false;
        }
    }
}

fn check_credential(config: &Config, all_passed: &mut bool) {
    match resolve_api_key(&config.llm.provider.auth) {
        Ok(key) => print_check(
            "API credential",
            true,
            format!("{} ({})", config.llm.provider.id, mask_secret(&key)),
        ),
        Err(e) => {
            print_check("API credential", false, e.to_string());
            *all_passed = false;
        }
    }
}

fn check_data_dir(config: &Config, all_passed: &mut bool) {
    let path = &config.storage.data_dir;
    let (ok, detail) = probe_writable(path);
    print_check("Data directory", ok, detail);
    if !ok {
        *all_passed = false;
    }
}

/// Create the directory if needed and try writing a probe file.
fn probe_writable(path: &std::path::Path) -> (bool, String) {
    if let Err(e) = std::fs::create_dir_all(path) {
        return (false, format!("{} (cannot create: {e})", path.display()));
    }
    let probe = path.join("doctor-probe");
    let writable = std::fs::write(&probe, b"probe").is_ok();
    let _ = std::fs::remove_file(&probe);
    if writable {
        (true, format!("{} (writable)", path.display()))
    } else {
        (false, format!("{} (not writable)", path.display()))
    }
}

/// Informational only.
fn check_vault(config: &Config) {
    let store = FileKvStore::new(config.storage.data_dir.clone());
    let detail = match load_auth(&store) {
        Ok(Some(_)) if has_accepted_legal(&store) => "registered, terms accepted".to_string(),
        Ok(Some(_)) => "registered, terms not yet accepted".to_string(),
        Ok(None) => "no password yet (run `strategos register`)".to_string(),
        Err(e) => format!("unreadable: {e}"),
    };
    print_check("Vault", true, detail);
}

// ── Formatting helper ─────────────────────────────────────────────────

fn print_check(name: &str, passed: bool, detail: String) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("  [{status}] {name}: {detail}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let (ok, detail) = probe_writable(&nested);
        assert!(ok, "{detail}");
        assert!(nested.is_dir());
        assert!(!nested.join("doctor-probe").exists());
    }

    #[test]
    fn probe_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let (ok, _) = probe_writable(&file);
        assert!(!ok);
    }
}
