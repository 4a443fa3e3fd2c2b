//! The access gate in front of the survey.
//!
//! ```text
//! loading ──► needs_registration ──register──► needs_legal ──accept──► authenticated
//!        └──► needs_login ──login(ok)──► needs_legal | authenticated
//! any state ──cleared──► needs_registration
//! ```

use serde::Serialize;
use sg_domain::error::{Error, Result};
use sg_domain::trace::TraceEvent;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    Loading,
    NeedsRegistration,
    NeedsLogin,
    NeedsLegal,
    Authenticated,
}

impl AccessState {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessState::Loading => "loading",
            AccessState::NeedsRegistration => "needs_registration",
            AccessState::NeedsLogin => "needs_login",
            AccessState::NeedsLegal => "needs_legal",
            AccessState::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessEvent {
    /// Persisted records were inspected at startup.
    Bootstrapped { has_auth: bool },
    Registered,
    /// A password check succeeded. Failed checks are not events.
    LoggedIn { legal_accepted: bool },
    LegalAccepted,
    /// All records were deleted.
    Cleared,
}

/// Compute the next state. Pure; rejects events the current state does not
/// accept.
pub fn transition(state: AccessState, event: AccessEvent) -> Result<AccessState> {
    use AccessEvent as E;
    use AccessState as S;

    let next = match (state, event) {
        (_, E::Cleared) => S::NeedsRegistration,
        (S::Loading, E::Bootstrapped { has_auth: true }) => S::NeedsLogin,
        (S::Loading, E::Bootstrapped { has_auth: false }) => S::NeedsRegistration,
        (S::NeedsRegistration, E::Registered) => S::NeedsLegal,
        (S::NeedsLogin, E::LoggedIn { legal_accepted: true }) => S::Authenticated,
        (S::NeedsLogin, E::LoggedIn { legal_accepted: false }) => S::NeedsLegal,
        (S::NeedsLegal, E::LegalAccepted) => S::Authenticated,
        (state, event) => {
            return Err(Error::Access(format!(
                "{event:?} is not valid in state {state}"
            )))
        }
    };
    Ok(next)
}

/// Holds the current state and logs every change.
#[derive(Debug, Clone)]
pub struct AccessFlow {
    state: AccessState,
}

impl AccessFlow {
    pub fn new() -> Self {
        Self {
            state: AccessState::Loading,
        }
    }

    pub fn state(&self) -> AccessState {
        self.state
    }

    /// Validate `event` without applying it.
    pub fn check(&self, event: AccessEvent) -> Result<AccessState> {
        transition(self.state, event)
    }

    pub fn apply(&mut self, event: AccessEvent) -> Result<AccessState> {
        let next = transition(self.state, event)?;
        if next != self.state {
            TraceEvent::AccessTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            }
            .emit();
        }
        self.state = next;
        Ok(next)
    }

    /// Fail with an access error unless the gate is open.
    pub fn require_authenticated(&self) -> Result<()> {
        if self.state == AccessState::Authenticated {
            Ok(())
        } else {
            Err(Error::Access(format!(
                "vault is locked (state {})",
                self.state
            )))
        }
    }
}

impl Default for AccessFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_path() {
        let s = transition(AccessState::Loading, AccessEvent::Bootstrapped { has_auth: false }).unwrap();
        assert_eq!(s, AccessState::NeedsRegistration);
        let s = transition(s, AccessEvent::Registered).unwrap();
        assert_eq!(s, AccessState::NeedsLegal);
        let s = transition(s, AccessEvent::LegalAccepted).unwrap();
        assert_eq!(s, AccessState::Authenticated);
    }

    #[test]
    fn returning_user_skips_legal_when_accepted() {
        let s = transition(AccessState::Loading, AccessEvent::Bootstrapped { has_auth: true }).unwrap();
        assert_eq!(s, AccessState::NeedsLogin);
        assert_eq!(
            transition(s, AccessEvent::LoggedIn { legal_accepted: true }).unwrap(),
            AccessState::Authenticated
        );
        assert_eq!(
            transition(s, AccessEvent::LoggedIn { legal_accepted: false }).unwrap(),
            AccessState::NeedsLegal
        );
    }

    #[test]
    fn authenticated_only_leaves_via_clear() {
        let s = AccessState::Authenticated;
        for event in [
            AccessEvent::Bootstrapped { has_auth: true },
            AccessEvent::Registered,
            AccessEvent::LoggedIn { legal_accepted: true },
            AccessEvent::LegalAccepted,
        ] {
            assert!(matches!(transition(s, event), Err(Error::Access(_))), "{event:?}");
        }
        assert_eq!(
            transition(s, AccessEvent::Cleared).unwrap(),
            AccessState::NeedsRegistration
        );
    }

    #[test]
    fn register_is_rejected_for_existing_account() {
        let err = transition(AccessState::NeedsLogin, AccessEvent::Registered).unwrap_err();
        assert!(err.to_string().contains("needs_login"));
    }

    #[test]
    fn flow_requires_authentication() {
        let mut flow = AccessFlow::new();
        assert!(flow.require_authenticated().is_err());
        flow.apply(AccessEvent::Bootstrapped { has_auth: false }).unwrap();
        flow.apply(AccessEvent::Registered).unwrap();
        assert!(flow.require_authenticated().is_err());
        flow.apply(AccessEvent::LegalAccepted).unwrap();
        assert!(flow.require_authenticated().is_ok());
    }
}
