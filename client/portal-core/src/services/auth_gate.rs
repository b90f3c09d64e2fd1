use std::io;

use crate::models::session::Session;
use crate::storage::{SessionStore, AUTH_FLAG_SLOT, SESSION_SLOT};

/// Single source of truth for "can the current actor mutate data".
///
/// Stateless classifier over the persisted session: every page re-reads on
/// its own lifecycle. There is no observer model, so a logout in one tab does
/// not live-update another open tab; that is a known limitation of the
/// design, not something this gate papers over.
///
/// Failure semantics are fail-closed: missing storage, an unreadable slot or
/// a corrupt payload all resolve to the default unauthorized session, never
/// to admin, and never to an error.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    store: SessionStore,
}

impl AuthorizationGate {
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The currently persisted session, or the empty unauthorized identity.
    pub fn current_session(&self) -> Session {
        let Some(raw) = self.store.get(SESSION_SLOT) else {
            return Session::default();
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "stored session is corrupt, treating as logged out");
                Session::default()
            }
        }
    }

    /// Pure role check: true iff the session resolved to the admin role.
    pub fn is_authorized(&self, session: &Session) -> bool {
        session.is_admin()
    }

    /// Mutate capability for a specific resource. Authorization here is
    /// role-based, not ownership-based: any admin session may edit any
    /// resource, so the owner argument is accepted and ignored. Row-level
    /// ACLs would be a new requirement, not an inferred one.
    pub fn can_edit(&self, session: &Session, _resource_owner_email: Option<&str>) -> bool {
        self.is_authorized(session)
    }

    /// Persists a freshly logged-in session into both storage slots.
    pub fn persist_session(&self, session: &Session) -> io::Result<()> {
        let json = serde_json::to_string(session)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.store.set(SESSION_SLOT, &json)?;
        self.store.set(AUTH_FLAG_SLOT, "true")?;
        Ok(())
    }

    /// Logout: clears the session and its companion flag. Local-only; no
    /// backend call and no cross-tab broadcast.
    pub fn logout(&self) {
        self.store.remove(SESSION_SLOT);
        self.store.remove(AUTH_FLAG_SLOT);
        tracing::debug!("session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::Role;

    fn temp_gate(tag: &str) -> AuthorizationGate {
        let dir = std::env::temp_dir().join(format!(
            "htportal-gate-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        AuthorizationGate::new(SessionStore::new(dir))
    }

    #[test]
    fn missing_session_resolves_to_user_role() {
        let gate = temp_gate("missing");
        let session = gate.current_session();
        assert_eq!(session.role, Role::User);
        assert!(!gate.is_authorized(&session));
    }

    #[test]
    fn corrupt_session_fails_closed() {
        let gate = temp_gate("corrupt");
        gate.store().set(SESSION_SLOT, "{not json").unwrap();
        let session = gate.current_session();
        assert_eq!(session, Session::default());
        assert!(!gate.is_authorized(&session));
    }

    #[test]
    fn member_session_cannot_edit() {
        let gate = temp_gate("member");
        let session = Session::new("M", "m@ht.org", vec!["Member".into()]);
        gate.persist_session(&session).unwrap();

        let current = gate.current_session();
        assert!(!gate.is_authorized(&current));
        assert!(!gate.can_edit(&current, Some("m@ht.org")));
    }

    #[test]
    fn admin_session_can_edit_any_resource() {
        let gate = temp_gate("admin");
        let session = Session::new("A", "a@ht.org", vec!["Admin".into()]);
        gate.persist_session(&session).unwrap();

        let current = gate.current_session();
        assert!(gate.is_authorized(&current));
        // Ownership is ignored: an admin edits rows owned by anyone.
        assert!(gate.can_edit(&current, Some("someone.else@ht.org")));
        assert!(gate.can_edit(&current, None));
    }

    #[test]
    fn current_session_is_idempotent() {
        let gate = temp_gate("idempotent");
        let session = Session::new("M", "m@ht.org", vec!["Manager".into()]);
        gate.persist_session(&session).unwrap();

        assert_eq!(gate.current_session(), gate.current_session());
    }

    #[test]
    fn storage_round_trip_preserves_authorization() {
        let gate = temp_gate("roundtrip");
        let before = Session::new("M", "m@ht.org", vec!["Manager".into()]);
        let authorized_before = gate.is_authorized(&before);

        gate.persist_session(&before).unwrap();
        let after = gate.current_session();
        assert_eq!(gate.is_authorized(&after), authorized_before);
        assert_eq!(after, before);
    }

    #[test]
    fn logout_clears_both_slots() {
        let gate = temp_gate("logout");
        let session = Session::new("A", "a@ht.org", vec!["Admin".into()]);
        gate.persist_session(&session).unwrap();
        assert!(gate.store().get(AUTH_FLAG_SLOT).is_some());

        gate.logout();
        assert_eq!(gate.store().get(SESSION_SLOT), None);
        assert_eq!(gate.store().get(AUTH_FLAG_SLOT), None);
        assert!(!gate.is_authorized(&gate.current_session()));
    }
}
