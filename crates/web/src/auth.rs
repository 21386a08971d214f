//! Demo authentication and session management.
//!
//! Credentials are checked against a fixed in-memory allow-list and compared
//! in the clear - this is a demo login, not real authentication. The
//! verification seam is the [`CredentialVerifier`] trait, so a real
//! implementation could replace [`StaticCredentials`] without touching the
//! session manager's contract.
//!
//! The session is a single mutable slot: one identity per deployment, last
//! writer wins, no expiry, persisted under the `session` storage key so it
//! survives restarts.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::store::{SnapshotStore, keys};

/// The authenticated user's minimal profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque user id.
    pub id: String,
    /// Login name, shown in the navbar.
    pub username: String,
}

/// Credential verification capability.
///
/// Implementations decide whether a (username, password) pair maps to an
/// identity. The session manager only ever calls [`verify`].
///
/// [`verify`]: CredentialVerifier::verify
pub trait CredentialVerifier: Send + Sync {
    /// Verify a credential pair, returning the matched identity.
    ///
    /// `None` means rejection; callers must not distinguish between an
    /// unknown user and a wrong password.
    fn verify(&self, username: &str, password: &str) -> Option<Identity>;
}

/// A static credential record in the allow-list.
struct CredentialRecord {
    username: &'static str,
    password: &'static str,
    id: &'static str,
}

/// Fixed demo allow-list compiled into the binary.
pub struct StaticCredentials {
    records: &'static [CredentialRecord],
}

impl StaticCredentials {
    /// The built-in demo accounts.
    #[must_use]
    pub const fn demo() -> Self {
        const RECORDS: &[CredentialRecord] = &[
            CredentialRecord {
                username: "admin",
                password: "password123",
                id: "1",
            },
            CredentialRecord {
                username: "user",
                password: "user123",
                id: "2",
            },
            CredentialRecord {
                username: "demo",
                password: "demo123",
                id: "3",
            },
        ];
        Self { records: RECORDS }
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> Option<Identity> {
        // Exact, case-sensitive match on both fields
        self.records
            .iter()
            .find(|r| r.username == username && r.password == password)
            .map(|r| Identity {
                id: r.id.to_string(),
                username: r.username.to_string(),
            })
    }
}

/// Owns the current identity and mirrors it to the snapshot store.
pub struct SessionManager {
    store: SnapshotStore,
    verifier: Box<dyn CredentialVerifier>,
    current: RwLock<Option<Identity>>,
}

impl SessionManager {
    /// Create a session manager, restoring any persisted identity.
    ///
    /// A missing or malformed session snapshot starts the manager logged out.
    #[must_use]
    pub fn new(store: SnapshotStore, verifier: Box<dyn CredentialVerifier>) -> Self {
        let current = store.load::<Identity>(keys::SESSION);
        if let Some(identity) = &current {
            tracing::info!(username = %identity.username, "Restored persisted session");
        }

        Self {
            store,
            verifier,
            current: RwLock::new(current),
        }
    }

    /// Attempt a login. Returns `true` on success.
    ///
    /// On success the matched identity becomes current and is persisted; on
    /// rejection the current identity is left unchanged.
    pub fn login(&self, username: &str, password: &str) -> bool {
        let Some(identity) = self.verifier.verify(username, password) else {
            tracing::info!(username, "Login rejected");
            return false;
        };

        if let Err(e) = self.store.save(keys::SESSION, &identity) {
            tracing::warn!(error = %e, "Failed to persist session");
        }

        tracing::info!(username = %identity.username, "Login succeeded");
        *self.current.write().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(identity);
        true
    }

    /// Clear the current identity and the persisted session record. Idempotent.
    pub fn logout(&self) {
        *self.current.write().unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        self.store.remove(keys::SESSION);
    }

    /// The current identity, if logged in.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn manager(dir: &std::path::Path) -> SessionManager {
        let store = SnapshotStore::open(dir).unwrap();
        SessionManager::new(store, Box::new(StaticCredentials::demo()))
    }

    #[test]
    fn test_login_success_sets_and_persists_identity() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        assert!(sessions.login("admin", "password123"));
        assert!(sessions.is_authenticated());

        let identity = sessions.current().unwrap();
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.id, "1");

        // Persisted copy is the source of truth across restarts
        let restored = manager(dir.path());
        assert_eq!(restored.current().unwrap().username, "admin");
    }

    #[test]
    fn test_login_failure_leaves_identity_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        assert!(sessions.login("admin", "password123"));
        assert!(!sessions.login("admin", "wrong"));

        assert_eq!(sessions.current().unwrap().username, "admin");
    }

    #[test]
    fn test_login_is_case_sensitive() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        assert!(!sessions.login("Admin", "password123"));
        assert!(!sessions.login("admin", "Password123"));
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_logout_clears_identity_and_store() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        assert!(sessions.login("demo", "demo123"));
        sessions.logout();

        assert!(!sessions.is_authenticated());
        assert!(sessions.current().is_none());

        // Nothing restored on next start
        let restored = manager(dir.path());
        assert!(!restored.is_authenticated());

        // Idempotent
        sessions.logout();
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_corrupt_session_snapshot_starts_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("session.json"), b"{broken").unwrap();

        let sessions = manager(dir.path());
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn test_last_writer_wins() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = manager(dir.path());

        assert!(sessions.login("admin", "password123"));
        assert!(sessions.login("user", "user123"));

        assert_eq!(sessions.current().unwrap().username, "user");
    }
}
