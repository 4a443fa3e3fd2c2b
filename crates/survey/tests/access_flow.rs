use sg_domain::error::Error;
use sg_survey::vault::{AUTH_KEY, LEGAL_KEY, PROGRESS_KEY};
use sg_survey::{AccessState, FileKvStore, KvStore, Vault};
use std::sync::Arc;

fn open(dir: &std::path::Path) -> Vault {
    Vault::open(Arc::new(FileKvStore::new(dir))).unwrap()
}

fn unlocked(dir: &std::path::Path) -> Vault {
    let mut vault = open(dir);
    vault.register("s3cret-pass", "s3cret-pass").unwrap();
    vault.accept_legal().unwrap();
    vault
}

#[test]
fn register_then_login_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut vault = unlocked(dir.path());
        vault.set_answer("q_goals", "Reduce churn by 15%").unwrap();
    }

    let mut vault = open(dir.path());
    assert_eq!(vault.state(), AccessState::NeedsLogin);

    assert!(!vault.login("wrong-password").unwrap());
    assert_eq!(vault.state(), AccessState::NeedsLogin);

    assert!(vault.login("s3cret-pass").unwrap());
    assert_eq!(vault.state(), AccessState::Authenticated);
    assert_eq!(
        vault.responses().unwrap().answer("q_goals"),
        Some("Reduce churn by 15%")
    );
}

#[test]
fn login_without_legal_acceptance_needs_legal() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut vault = open(dir.path());
        vault.register("s3cret-pass", "s3cret-pass").unwrap();
        // Walk away from the legal screen.
    }

    let mut vault = open(dir.path());
    assert!(vault.login("s3cret-pass").unwrap());
    assert_eq!(vault.state(), AccessState::NeedsLegal);
    vault.accept_legal().unwrap();
    assert_eq!(vault.state(), AccessState::Authenticated);
}

#[test]
fn export_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut vault = unlocked(dir.path());
    vault.set_answer("q_goals", "grow").unwrap();
    vault.set_answer("q_trends", "AI everywhere").unwrap();
    let exported = vault.export_responses().unwrap();
    let before = vault.responses().unwrap().clone();

    vault.set_answer("q_goals", "changed").unwrap();
    let outcome = vault.import_responses(&exported).unwrap();
    assert!(outcome.dropped.is_empty());
    assert_eq!(vault.responses().unwrap(), &before);
}

#[test]
fn import_replaces_instead_of_merging() {
    let dir = tempfile::tempdir().unwrap();
    let mut vault = unlocked(dir.path());
    vault.set_answer("q_goals", "grow").unwrap();

    vault.import_responses(r#"{"q_kpis":"nps","unknown_id":"kept"}"#).unwrap();
    let responses = vault.responses().unwrap();
    assert_eq!(responses.answer("q_goals"), None);
    assert_eq!(responses.answer("q_kpis"), Some("nps"));
    assert_eq!(responses.answer("unknown_id"), Some("kept"));

    // Persisted as well.
    let store = FileKvStore::new(dir.path());
    let raw = store.get(PROGRESS_KEY).unwrap().unwrap();
    assert!(raw.contains("\"q_kpis\":\"nps\""));
}

#[test]
fn bad_import_leaves_map_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut vault = unlocked(dir.path());
    vault.set_answer("q_goals", "grow").unwrap();
    let before = vault.responses().unwrap().clone();

    for doc in ["\"a string\"", "7", "[]", "null", "not json"] {
        let err = vault.import_responses(doc).unwrap_err();
        assert!(matches!(err, Error::ImportFormat(_)), "{doc}");
        assert_eq!(vault.responses().unwrap(), &before);
    }
}

#[test]
fn clear_all_makes_progress_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let mut vault = unlocked(dir.path());
    vault.set_answer("q_goals", "secret plans").unwrap();

    vault.clear_all().unwrap();
    assert_eq!(vault.state(), AccessState::NeedsRegistration);
    assert!(vault.responses().is_err());

    let store = FileKvStore::new(dir.path());
    for key in [AUTH_KEY, LEGAL_KEY, PROGRESS_KEY] {
        assert_eq!(store.get(key).unwrap(), None, "{key}");
    }

    // A restart sees a brand new vault, and a new account starts empty.
    let mut vault = open(dir.path());
    assert_eq!(vault.state(), AccessState::NeedsRegistration);
    vault.register("another-pass", "another-pass").unwrap();
    vault.accept_legal().unwrap();
    assert!(vault.responses().unwrap().is_empty());
}

#[test]
fn clear_all_from_login_screen() {
    let dir = tempfile::tempdir().unwrap();
    drop(unlocked(dir.path()));

    let mut vault = open(dir.path());
    assert_eq!(vault.state(), AccessState::NeedsLogin);
    vault.clear_all().unwrap();
    assert_eq!(vault.state(), AccessState::NeedsRegistration);
}
