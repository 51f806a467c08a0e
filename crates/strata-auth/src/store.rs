//! Tab-wide session store.
//!
//! # Design
//! - One store per application load, shared by `Rc` and injected into consumers.
//! - State is replaced as a whole value; readers only ever see a complete
//!   [`SessionState`], and listeners run after the replacement is committed.
//! - Only the username is persisted; permissions are re-derived from the backend
//!   on every fresh load.

use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::model::{Identity, PermissionSet};
use crate::storage::UsernameStorage;

/// Session lifecycle state. An identity exists only while authenticated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No session.
    #[default]
    Anonymous,
    /// A reconciled or freshly logged-in session.
    Authenticated(Rc<Identity>),
    /// A logout request is pending; resolves to [`SessionState::Anonymous`].
    LoggingOut,
}

impl SessionState {
    /// Whether an identity is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The held identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Rc<Identity>> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous | Self::LoggingOut => None,
        }
    }
}

type Listener = Rc<dyn Fn(&SessionState)>;

/// Holder of the current identity and its permissions.
pub struct SessionStore {
    state: RefCell<SessionState>,
    storage: Box<dyn UsernameStorage>,
    listeners: RefCell<Vec<Listener>>,
}

impl SessionStore {
    /// Create an anonymous store persisting usernames into `storage`.
    #[must_use]
    pub fn new(storage: impl UsernameStorage + 'static) -> Self {
        Self {
            state: RefCell::new(SessionState::Anonymous),
            storage: Box::new(storage),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Whether an identity is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Permissions of the current identity; empty when anonymous.
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        self.state
            .borrow()
            .identity()
            .map(|identity| identity.permissions.clone())
            .unwrap_or_default()
    }

    /// The current identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Rc<Identity>> {
        self.state.borrow().identity().cloned()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Whether a logout request is pending.
    #[must_use]
    pub fn is_logging_out(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::LoggingOut)
    }

    /// Username for optimistic display: the live identity, else the persisted one.
    ///
    /// Never use this for authorization decisions.
    #[must_use]
    pub fn last_known_username(&self) -> Option<String> {
        if let Some(identity) = self.identity() {
            return Some(identity.username.clone());
        }
        match self.storage.load() {
            Ok(username) => username.filter(|name| !name.trim().is_empty()),
            Err(err) => {
                warn!(error = %err, "failed to read persisted username");
                None
            }
        }
    }

    /// Install `username` and `permissions` as the session identity, replacing
    /// any prior identity.
    pub fn set(&self, username: impl Into<String>, permissions: PermissionSet) {
        self.install(Identity::new(username, permissions));
    }

    /// Drop the session. Clearing an anonymous store changes nothing.
    pub fn clear(&self) {
        if matches!(*self.state.borrow(), SessionState::Anonymous) {
            return;
        }
        if let Err(err) = self.storage.remove() {
            warn!(error = %err, "failed to remove persisted username");
        }
        info!("session cleared");
        self.replace(SessionState::Anonymous);
    }

    /// Register a listener notified after every state replacement.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Install a decoded identity and hand back the shared copy readers see.
    pub(crate) fn install(&self, identity: Identity) -> Rc<Identity> {
        if let Err(err) = self.storage.save(&identity.username) {
            warn!(error = %err, "failed to persist username");
        }
        info!(username = %identity.username, "session established");
        let identity = Rc::new(identity);
        self.replace(SessionState::Authenticated(Rc::clone(&identity)));
        identity
    }

    /// Enter the logout marker, returning the state to restore if logout fails.
    pub(crate) fn begin_logout(&self) -> AuthResult<SessionState> {
        let previous = self.state();
        if matches!(previous, SessionState::LoggingOut) {
            return Err(AuthError::LogoutInProgress);
        }
        self.replace(SessionState::LoggingOut);
        Ok(previous)
    }

    /// Leave the logout marker without ending the session.
    pub(crate) fn abort_logout(&self, previous: SessionState) {
        if self.is_logging_out() {
            self.replace(previous);
        }
    }

    fn replace(&self, next: SessionState) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            *state = next;
            state.clone()
        };
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl Debug for SessionStore {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::model::Action;
    use crate::storage::MemoryStorage;

    fn pool_reader() -> PermissionSet {
        [("pool", vec![Action::Read])].into_iter().collect()
    }

    #[test]
    fn new_store_is_anonymous_with_no_permissions() {
        let store = SessionStore::new(MemoryStorage::default());
        assert!(!store.is_authenticated());
        assert!(store.permissions().is_empty());
        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(store.last_known_username(), None);
    }

    #[test]
    fn set_then_clear_round_trip() {
        let store = SessionStore::new(MemoryStorage::default());
        store.set("alice", pool_reader());
        assert!(store.is_authenticated());
        assert!(store.permissions().can_read("pool"));
        assert_eq!(store.last_known_username().as_deref(), Some("alice"));

        store.clear();
        assert!(!store.is_authenticated());
        assert!(store.permissions().is_empty());
        assert_eq!(store.last_known_username(), None);
    }

    #[test]
    fn set_replaces_prior_identity_wholesale() {
        let store = SessionStore::new(MemoryStorage::default());
        store.set("alice", pool_reader());
        store.set("bob", PermissionSet::empty());
        let identity = store.identity().expect("identity after set");
        assert_eq!(identity.username, "bob");
        assert!(!store.permissions().can_read("pool"));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = SessionStore::new(MemoryStorage::default());
        let notifications = Rc::new(RefCell::new(0_u32));
        {
            let notifications = Rc::clone(&notifications);
            store.subscribe(move |_| *notifications.borrow_mut() += 1);
        }
        store.set("alice", pool_reader());
        store.clear();
        let after_first = store.state();
        store.clear();
        assert_eq!(store.state(), after_first);
        assert_eq!(*notifications.borrow(), 2);
    }

    #[test]
    fn persisted_username_survives_reload_but_permissions_do_not() {
        let store = SessionStore::new(MemoryStorage::with_username("alice"));
        assert_eq!(store.last_known_username().as_deref(), Some("alice"));
        assert!(!store.is_authenticated());
        assert!(store.permissions().is_empty());
    }

    #[test]
    fn clearing_anonymous_store_keeps_remembered_username() {
        let store = SessionStore::new(MemoryStorage::with_username("alice"));
        store.clear();
        assert_eq!(store.last_known_username().as_deref(), Some("alice"));
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn listeners_observe_complete_states() {
        let store = Rc::new(SessionStore::new(MemoryStorage::default()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            let reader = Rc::clone(&store);
            store.subscribe(move |state| {
                assert_eq!(*state, reader.state());
                seen.borrow_mut().push(state.identity().map(|id| id.username.clone()));
            });
        }
        store.set("alice", pool_reader());
        store.clear();
        assert_eq!(*seen.borrow(), vec![Some("alice".to_string()), None]);
    }

    #[test]
    fn logout_marker_rejects_double_submit_and_can_abort() -> AuthResult<()> {
        let store = SessionStore::new(MemoryStorage::default());
        store.set("alice", pool_reader());
        let previous = store.begin_logout()?;
        assert!(store.is_logging_out());
        assert!(!store.is_authenticated());
        assert!(matches!(
            store.begin_logout(),
            Err(AuthError::LogoutInProgress)
        ));
        store.abort_logout(previous);
        assert!(store.is_authenticated());
        Ok(())
    }
}
