//! The password-gated vault holding survey progress.
//!
//! Three records live in the [`KvStore`]: the auth record, the legal
//! acceptance marker, and the progress map. Every operation that touches
//! answers requires the [`AccessFlow`] to be authenticated.

use crate::access::{AccessEvent, AccessFlow, AccessState};
use crate::legal::ACCEPTED_MARKER;
use crate::responses::ResponseMap;
use crate::store::KvStore;
use crate::transfer::{self, ImportOutcome};
use serde::{Deserialize, Serialize};
use sg_domain::error::{Error, Result};
use sg_domain::trace::TraceEvent;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;

pub const AUTH_KEY: &str = "auth.v2";
pub const LEGAL_KEY: &str = "legal.v1";
pub const PROGRESS_KEY: &str = "progress.v2";

/// The vault has a single local user.
pub const LOCAL_USERNAME: &str = "user";

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    pub username: String,
    /// Lowercase hex SHA-256 of the password.
    pub password_hash: String,
}

pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn hash_matches(stored: &str, candidate: &str) -> bool {
    stored.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// Registration rules, checked in order: both fields present, fields
/// match, minimum length.
pub fn validate_registration(password: &str, confirmation: &str) -> Result<()> {
    if password.is_empty() || confirmation.is_empty() {
        return Err(Error::Validation("Password fields cannot be empty.".into()));
    }
    if password != confirmation {
        return Err(Error::Validation("Passwords do not match.".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long."
        )));
    }
    Ok(())
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Record helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Read the auth record. An unparseable record is treated as absent.
pub fn load_auth(store: &dyn KvStore) -> Result<Option<AuthRecord>> {
    let Some(raw) = store.get(AUTH_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            tracing::warn!(error = %e, "auth record is corrupt; treating as unregistered");
            Ok(None)
        }
    }
}

pub fn has_accepted_legal(store: &dyn KvStore) -> bool {
    match store.get(LEGAL_KEY) {
        Ok(value) => value.as_deref() == Some(ACCEPTED_MARKER),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read legal record");
            false
        }
    }
}

/// Load the progress map. Read or parse failures yield an empty map.
pub fn load_responses(store: &dyn KvStore) -> ResponseMap {
    let raw = match store.get(PROGRESS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ResponseMap::new(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load progress");
            return ResponseMap::new();
        }
    };
    match transfer::parse_document(&raw) {
        Ok(outcome) => outcome.responses,
        Err(e) => {
            tracing::warn!(error = %e, "stored progress is unreadable; starting empty");
            ResponseMap::new()
        }
    }
}

/// Persist the whole map. Best-effort: failures are logged, not returned.
pub fn save_responses(store: &dyn KvStore, responses: &ResponseMap) {
    let result = transfer::export_document(responses).and_then(|doc| store.set(PROGRESS_KEY, &doc));
    match result {
        Ok(()) => TraceEvent::ResponsesSaved {
            answered: responses.answered_count(),
        }
        .emit(),
        Err(e) => tracing::warn!(error = %e, "failed to save progress"),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Vault
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct Vault {
    store: Arc<dyn KvStore>,
    flow: AccessFlow,
    responses: ResponseMap,
}

impl Vault {
    /// Inspect the store and move out of `loading`.
    pub fn open(store: Arc<dyn KvStore>) -> Result<Self> {
        let has_auth = load_auth(store.as_ref())?.is_some();
        let mut flow = AccessFlow::new();
        flow.apply(AccessEvent::Bootstrapped { has_auth })?;
        Ok(Self {
            store,
            flow,
            responses: ResponseMap::new(),
        })
    }

    pub fn state(&self) -> AccessState {
        self.flow.state()
    }

    /// Create the vault password.
    ///
    /// Any legal or progress records left over from an earlier account are
    /// wiped before the new auth record is written.
    pub fn register(&mut self, password: &str, confirmation: &str) -> Result<()> {
        self.flow.check(AccessEvent::Registered)?;
        validate_registration(password, confirmation)?;

        self.store.remove(LEGAL_KEY)?;
        self.store.remove(PROGRESS_KEY)?;

        let record = AuthRecord {
            username: LOCAL_USERNAME.into(),
            password_hash: hash_password(password),
        };
        self.store.set(AUTH_KEY, &serde_json::to_string(&record)?)?;

        self.responses = ResponseMap::new();
        self.flow.apply(AccessEvent::Registered)?;
        Ok(())
    }

    /// Check the password. `Ok(false)` on mismatch; the state is unchanged.
    ///
    /// On success the stored progress is loaded and the flow moves to
    /// `needs_legal` or `authenticated`.
    pub fn login(&mut self, password: &str) -> Result<bool> {
        self.flow.check(AccessEvent::LoggedIn { legal_accepted: false })?;

        let Some(record) = load_auth(self.store.as_ref())? else {
            return Ok(false);
        };
        if !hash_matches(&record.password_hash, &hash_password(password)) {
            tracing::debug!("login rejected");
            return Ok(false);
        }

        self.responses = load_responses(self.store.as_ref());
        let legal_accepted = has_accepted_legal(self.store.as_ref());
        self.flow.apply(AccessEvent::LoggedIn { legal_accepted })?;
        Ok(true)
    }

    pub fn accept_legal(&mut self) -> Result<()> {
        self.flow.check(AccessEvent::LegalAccepted)?;
        self.store.set(LEGAL_KEY, ACCEPTED_MARKER)?;
        self.flow.apply(AccessEvent::LegalAccepted)?;
        Ok(())
    }

    pub fn responses(&self) -> Result<&ResponseMap> {
        self.flow.require_authenticated()?;
        Ok(&self.responses)
    }

    /// Record one answer and persist the map.
    pub fn set_answer(&mut self, question_id: &str, answer: &str) -> Result<()> {
        self.flow.require_authenticated()?;
        self.responses.set(question_id, answer);
        save_responses(self.store.as_ref(), &self.responses);
        Ok(())
    }

    pub fn clear_answer(&mut self, question_id: &str) -> Result<()> {
        self.flow.require_authenticated()?;
        if self.responses.remove(question_id).is_some() {
            save_responses(self.store.as_ref(), &self.responses);
        }
        Ok(())
    }

    pub fn export_responses(&self) -> Result<String> {
        transfer::export_document(self.responses()?)
    }

    /// Replace the whole map with the document's contents.
    ///
    /// On a format error nothing changes. On success the new map is
    /// persisted best-effort.
    pub fn import_responses(&mut self, document: &str) -> Result<ImportOutcome> {
        self.flow.require_authenticated()?;
        let outcome = transfer::parse_document(document)?;

        self.responses = outcome.responses.clone();
        save_responses(self.store.as_ref(), &self.responses);

        TraceEvent::ResponsesImported {
            entries: outcome.responses.len(),
            dropped: outcome.dropped.len(),
        }
        .emit();
        Ok(outcome)
    }

    /// Delete every record and return to `needs_registration`.
    ///
    /// All three removals are attempted and in-memory state is dropped even
    /// if one fails; the first failure is returned afterwards.
    pub fn clear_all(&mut self) -> Result<()> {
        let mut first_err = None;
        for key in [AUTH_KEY, LEGAL_KEY, PROGRESS_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to delete record");
                first_err.get_or_insert(e);
            }
        }

        self.responses = ResponseMap::new();
        self.flow.apply(AccessEvent::Cleared)?;
        TraceEvent::VaultCleared.emit();

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
