//! Non-interactive vault commands: register, answer, review, export,
//! import, reset.

use std::path::PathBuf;

use sg_domain::error::Error;
use sg_survey::access::AccessState;
use sg_survey::transfer::{default_file_name, IMPORT_FAILED_MESSAGE};
use sg_survey::{Catalog, Vault};

use crate::bootstrap;
use crate::cli::input;
use crate::render;

pub fn register(vault: &mut Vault) -> anyhow::Result<()> {
    if vault.state() == AccessState::NeedsLogin {
        anyhow::bail!("a password already exists on this device; run `strategos reset` to start over");
    }
    bootstrap::unlock(vault)?;
    println!("Ready. Run `strategos survey` to start answering.");
    Ok(())
}

pub fn answer(vault: &mut Vault, catalog: &Catalog, question_id: &str, text: &str) -> anyhow::Result<()> {
    let Some(question) = catalog.find_question(question_id) else {
        anyhow::bail!("unknown question id '{question_id}' (see `strategos review`)");
    };
    bootstrap::unlock(vault)?;
    if text.trim().is_empty() {
        vault.clear_answer(question.id)?;
        println!("Cleared: {}", question.text);
    } else {
        vault.set_answer(question.id, text.trim())?;
        println!("Saved: {}", question.text);
    }
    Ok(())
}

pub fn review(vault: &mut Vault, catalog: &Catalog) -> anyhow::Result<()> {
    bootstrap::unlock(vault)?;
    print!("{}", render::review(catalog, vault.responses()?));
    Ok(())
}

/// Write a backup file and return its path.
pub fn export(vault: &mut Vault, output: Option<&str>) -> anyhow::Result<PathBuf> {
    bootstrap::unlock(vault)?;
    let document = vault.export_responses()?;
    let path = match output {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(default_file_name(chrono::Local::now().date_naive())),
    };
    std::fs::write(&path, document)
        .map_err(|e| anyhow::anyhow!("writing {}: {e}", path.display()))?;
    println!("Progress exported to {}", path.display());
    Ok(path)
}

/// Replace all answers with a backup file's contents.
///
/// Returns `Ok(false)` when the file is not a valid backup; the existing
/// answers are untouched in that case.
pub fn import(vault: &mut Vault, path: &str) -> anyhow::Result<bool> {
    let document =
        std::fs::read_to_string(path).map_err(|e| anyhow::anyhow!("reading {path}: {e}"))?;
    bootstrap::unlock(vault)?;
    match vault.import_responses(&document) {
        Ok(outcome) => {
            println!("Progress restored successfully!");
            if !outcome.dropped.is_empty() {
                eprintln!(
                    "Ignored {} entr{} with non-text values: {}",
                    outcome.dropped.len(),
                    if outcome.dropped.len() == 1 { "y" } else { "ies" },
                    outcome.dropped.join(", ")
                );
            }
            Ok(true)
        }
        Err(Error::ImportFormat(detail)) => {
            tracing::debug!(%detail, "import rejected");
            eprintln!("{IMPORT_FAILED_MESSAGE}");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Wipe the vault. Does not require unlocking.
pub fn reset(vault: &mut Vault, yes: bool) -> anyhow::Result<bool> {
    if !yes
        && !input::confirm(
            "This will delete your password and all saved progress on this device. Continue?",
        )?
    {
        println!("Nothing was deleted.");
        return Ok(false);
    }
    vault.clear_all()?;
    println!("All local data cleared.");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_survey::FileKvStore;
    use std::sync::Arc;

    fn authenticated_vault(dir: &std::path::Path) -> Vault {
        let mut vault = Vault::open(Arc::new(FileKvStore::new(dir))).unwrap();
        vault.register("correct horse", "correct horse").unwrap();
        vault.accept_legal().unwrap();
        vault
    }

    #[test]
    fn answer_rejects_unknown_question() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = authenticated_vault(dir.path());
        let err = answer(&mut vault, &Catalog::standard(), "q_nope", "x").unwrap_err();
        assert!(err.to_string().contains("unknown question id"));
    }

    #[test]
    fn answer_sets_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = authenticated_vault(dir.path());
        let catalog = Catalog::standard();

        answer(&mut vault, &catalog, "q_goals", "  Grow revenue ").unwrap();
        assert_eq!(vault.responses().unwrap().answer("q_goals"), Some("Grow revenue"));

        answer(&mut vault, &catalog, "q_goals", "").unwrap();
        assert!(!vault.responses().unwrap().is_answered("q_goals"));
    }

    #[test]
    fn export_then_import_in_a_fresh_vault() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = authenticated_vault(&dir.path().join("a"));
        vault.set_answer("q_goals", "Grow revenue").unwrap();

        let backup = dir.path().join("backup.json");
        let written = export(&mut vault, backup.to_str()).unwrap();
        assert_eq!(written, backup);

        let mut other = authenticated_vault(&dir.path().join("b"));
        other.set_answer("q_kpis", "stale").unwrap();
        assert!(import(&mut other, backup.to_str().unwrap()).unwrap());
        let responses = other.responses().unwrap();
        assert_eq!(responses.answer("q_goals"), Some("Grow revenue"));
        assert!(!responses.is_answered("q_kpis"));
    }

    #[test]
    fn import_of_bad_file_keeps_answers() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = authenticated_vault(&dir.path().join("v"));
        vault.set_answer("q_goals", "keep me").unwrap();

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[1, 2, 3]").unwrap();
        assert!(!import(&mut vault, bad.to_str().unwrap()).unwrap());
        assert_eq!(vault.responses().unwrap().answer("q_goals"), Some("keep me"));
    }

    #[test]
    fn import_of_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = authenticated_vault(dir.path());
        let missing = dir.path().join("missing.json");
        assert!(import(&mut vault, missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn reset_with_yes_clears_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = authenticated_vault(dir.path());
        vault.set_answer("q_goals", "gone soon").unwrap();

        assert!(reset(&mut vault, true).unwrap());
        assert_eq!(vault.state(), AccessState::NeedsRegistration);

        let reopened = Vault::open(Arc::new(FileKvStore::new(dir.path()))).unwrap();
        assert_eq!(reopened.state(), AccessState::NeedsRegistration);
    }

    #[test]
    fn register_refuses_existing_password() {
        let dir = tempfile::tempdir().unwrap();
        drop(authenticated_vault(dir.path()));
        let mut vault = Vault::open(Arc::new(FileKvStore::new(dir.path()))).unwrap();
        assert_eq!(vault.state(), AccessState::NeedsLogin);
        assert!(register(&mut vault).is_err());
    }
}
