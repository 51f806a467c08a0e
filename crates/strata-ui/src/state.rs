//! App-wide yewdux store.
//!
//! # Design
//! - The [`strata_auth::SessionStore`] stays the source of truth; this store
//!   holds a render-friendly snapshot that a session listener keeps current.
//! - Boot progress and open dialogs live here so components re-render from a
//!   single place.

use strata_auth::{
    AuthError, AuthResult, BootstrapOutcome, ModalId, ModalRegistry, PermissionSet, SessionState,
};
use yewdux::store::Store;

/// Global application store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Mirror of the session store.
    pub session: SessionView,
    /// How far startup reconciliation got.
    pub boot: BootState,
    /// Dialogs currently shown, oldest first.
    pub dialogs: Vec<OpenDialog>,
    /// Banner shown above the current page.
    pub notice: Option<Notice>,
}

/// Snapshot of the session for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionView {
    /// Signed-in username.
    pub username: Option<String>,
    /// Permissions of the signed-in operator; empty when signed out.
    pub permissions: PermissionSet,
    /// A logout request is pending.
    pub logging_out: bool,
}

impl SessionView {
    /// Project a session state.
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        match state {
            SessionState::Authenticated(identity) => Self {
                username: Some(identity.username.clone()),
                permissions: identity.permissions.clone(),
                logging_out: false,
            },
            SessionState::LoggingOut => Self {
                logging_out: true,
                ..Self::default()
            },
            SessionState::Anonymous => Self::default(),
        }
    }

    /// Whether an identity is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }
}

/// Startup reconciliation progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BootState {
    /// Waiting for the `/auth` probe.
    #[default]
    Pending,
    /// The backend asked for the local login form.
    LoginForm,
    /// Leaving for an external identity provider.
    Redirecting,
    /// A session is held; the console is usable.
    Ready,
    /// The probe failed; nothing is accessible.
    Failed(String),
}

impl BootState {
    /// Boot state reached by a reconciliation result.
    #[must_use]
    pub fn from_outcome(outcome: &AuthResult<BootstrapOutcome>) -> Self {
        match outcome {
            Ok(BootstrapOutcome::AlreadyAuthenticated | BootstrapOutcome::Authenticated(_)) => {
                Self::Ready
            }
            Ok(BootstrapOutcome::ShowLoginForm) => Self::LoginForm,
            Ok(BootstrapOutcome::ExternalRedirect(_)) => Self::Redirecting,
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Dialogs the shell can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    /// Product information.
    About,
    /// Sign-out confirmation.
    ConfirmLogout,
}

/// A shown dialog and its registry handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenDialog {
    /// Which dialog.
    pub kind: DialogKind,
    /// Id assigned by the modal registry.
    pub id: ModalId,
}

/// Page-level banners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The logout request failed and the session was kept.
    LogoutFailed,
}

impl Notice {
    /// Translation key and English default.
    #[must_use]
    pub const fn message(self) -> (&'static str, &'static str) {
        match self {
            Self::LogoutFailed => ("logout.error", "Sign-out failed. You are still signed in."),
        }
    }
}

impl AppStore {
    /// Mirror a session transition.
    ///
    /// A login completed from the login form also finishes boot.
    pub fn apply_session(&mut self, state: &SessionState) {
        self.session = SessionView::from_state(state);
        if self.session.is_authenticated() && self.boot == BootState::LoginForm {
            self.boot = BootState::Ready;
        }
    }

    /// Record a dialog the registry is now tracking.
    pub fn open_dialog(&mut self, kind: DialogKind, id: ModalId) {
        self.dialogs.retain(|dialog| dialog.kind != kind);
        self.dialogs.push(OpenDialog { kind, id });
    }

    /// Forget a dialog. Returns `false` when it was not shown.
    pub fn close_dialog(&mut self, kind: DialogKind) -> bool {
        let before = self.dialogs.len();
        self.dialogs.retain(|dialog| dialog.kind != kind);
        self.dialogs.len() != before
    }

    /// Registry id of a shown dialog.
    #[must_use]
    pub fn dialog(&self, kind: DialogKind) -> Option<ModalId> {
        self.dialogs
            .iter()
            .find(|dialog| dialog.kind == kind)
            .map(|dialog| dialog.id)
    }
}

/// Close every registered dialog once the session has ended.
///
/// Dialog handles drop their own [`AppStore::dialogs`] entry when closed, so
/// the store only loses a dialog when the registry does.
pub fn dismiss_dialogs_on_sign_out(modals: &ModalRegistry, state: &SessionState) {
    if matches!(state, SessionState::Anonymous) {
        modals.close_all();
    }
}

/// Translation key and English default for a failed login.
///
/// Rejected credentials get a specific message; everything else reads as an
/// outage so the form never hints at which part was wrong.
#[must_use]
pub const fn login_error_message(err: &AuthError) -> (&'static str, &'static str) {
    match err.http_status() {
        Some(400 | 401 | 403 | 422) => (
            "login.error.invalid",
            "The username or password you entered is incorrect.",
        ),
        _ => (
            "login.error.unavailable",
            "The console is unavailable. Try again later.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use strata_auth::{Action, Identity};

    fn alice() -> SessionState {
        SessionState::Authenticated(Rc::new(Identity::new(
            "alice",
            [("pool", vec![Action::Read])].into_iter().collect(),
        )))
    }

    #[test]
    fn session_view_tracks_every_state() {
        let view = SessionView::from_state(&alice());
        assert_eq!(view.username.as_deref(), Some("alice"));
        assert!(view.permissions.can_read("pool"));

        let view = SessionView::from_state(&SessionState::LoggingOut);
        assert!(view.logging_out);
        assert!(!view.is_authenticated());
        assert!(view.permissions.is_empty());

        assert_eq!(
            SessionView::from_state(&SessionState::Anonymous),
            SessionView::default()
        );
    }

    #[test]
    fn boot_state_follows_outcome() {
        assert_eq!(
            BootState::from_outcome(&Ok(BootstrapOutcome::ShowLoginForm)),
            BootState::LoginForm
        );
        assert_eq!(
            BootState::from_outcome(&Ok(BootstrapOutcome::ExternalRedirect(
                "auth/saml2/login".to_string()
            ))),
            BootState::Redirecting
        );
        assert_eq!(
            BootState::from_outcome(&Ok(BootstrapOutcome::AlreadyAuthenticated)),
            BootState::Ready
        );
        assert!(matches!(
            BootState::from_outcome(&Err(AuthError::status("auth", 503))),
            BootState::Failed(message) if message.contains("503")
        ));
    }

    #[test]
    fn login_from_form_completes_boot() {
        let mut store = AppStore {
            boot: BootState::LoginForm,
            ..AppStore::default()
        };
        store.apply_session(&alice());
        assert_eq!(store.boot, BootState::Ready);
        assert!(store.session.is_authenticated());
    }

    #[test]
    fn session_changes_do_not_leave_failed_boot() {
        let mut store = AppStore {
            boot: BootState::Failed("down".to_string()),
            ..AppStore::default()
        };
        store.apply_session(&alice());
        assert_eq!(store.boot, BootState::Failed("down".to_string()));
    }

    #[test]
    fn dialogs_are_keyed_by_kind() {
        let registry = ModalRegistry::new();
        let mut store = AppStore::default();
        let about = registry.open(|| ());
        let confirm = registry.open(|| ());
        store.open_dialog(DialogKind::About, about);
        store.open_dialog(DialogKind::ConfirmLogout, confirm);
        assert_eq!(store.dialog(DialogKind::About), Some(about));

        assert!(store.close_dialog(DialogKind::About));
        assert!(!store.close_dialog(DialogKind::About));
        assert_eq!(store.dialogs.len(), 1);
    }

    fn open_tracked(
        registry: &ModalRegistry,
        store: &Rc<RefCell<AppStore>>,
        kind: DialogKind,
    ) -> ModalId {
        let handle_store = Rc::clone(store);
        let id = registry.open(move || {
            handle_store.borrow_mut().close_dialog(kind);
        });
        store.borrow_mut().open_dialog(kind, id);
        id
    }

    #[test]
    fn sign_out_closes_dialogs_through_the_registry() {
        let registry = ModalRegistry::new();
        let store = Rc::new(RefCell::new(AppStore::default()));
        store.borrow_mut().apply_session(&alice());
        open_tracked(&registry, &store, DialogKind::About);
        let confirm = open_tracked(&registry, &store, DialogKind::ConfirmLogout);

        assert!(registry.close(confirm));
        for state in [SessionState::LoggingOut, SessionState::Anonymous] {
            dismiss_dialogs_on_sign_out(&registry, &state);
            store.borrow_mut().apply_session(&state);
        }

        assert!(registry.is_empty());
        assert!(store.borrow().dialogs.is_empty());
        assert!(!store.borrow().session.is_authenticated());
    }

    #[test]
    fn dialogs_survive_a_failed_sign_out() {
        let registry = ModalRegistry::new();
        let store = Rc::new(RefCell::new(AppStore::default()));
        let about = open_tracked(&registry, &store, DialogKind::About);

        for state in [SessionState::LoggingOut, alice()] {
            dismiss_dialogs_on_sign_out(&registry, &state);
            store.borrow_mut().apply_session(&state);
        }

        assert_eq!(registry.len(), 1);
        assert_eq!(store.borrow().dialog(DialogKind::About), Some(about));
    }

    #[test]
    fn login_errors_never_reveal_which_field_was_wrong() {
        assert_eq!(
            login_error_message(&AuthError::status("auth", 401)).0,
            "login.error.invalid"
        );
        assert_eq!(
            login_error_message(&AuthError::unreachable("auth", "offline")).0,
            "login.error.unavailable"
        );
        assert_eq!(
            login_error_message(&AuthError::contract("auth", "bad body")).0,
            "login.error.unavailable"
        );
    }
}
