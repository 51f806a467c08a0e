//! Login, logout, and startup session reconciliation.
//!
//! # Design
//! - The controller is the only writer of the [`SessionStore`]; views read it.
//! - Every backend call is attempted once. Failures propagate unchanged and
//!   leave the store as it was.
//! - Logout ordering is fixed: navigate to the logout view (history replaced),
//!   clear the store, run the caller's continuation, then redirect. The
//!   redirect is last because it unloads the page.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::error::{AuthError, AuthResult};
use crate::modal::ModalRegistry;
use crate::model::{AuthStatus, Credentials, Identity};
use crate::navigation::{NavigationMode, Navigator, View};
use crate::store::SessionStore;

/// How startup reconciliation resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// A session was already held; routed to the default view without a probe.
    AlreadyAuthenticated,
    /// The backend asked for the local login form.
    ShowLoginForm,
    /// Login was handed to an external identity provider at this URL.
    ExternalRedirect(String),
    /// The backend reported a live session, now installed in the store.
    Authenticated(Rc<Identity>),
}

/// Orchestrates the session lifecycle against the backend auth API.
pub struct AuthSessionController<A, N> {
    api: A,
    navigator: N,
    session: Rc<SessionStore>,
    modals: Rc<ModalRegistry>,
    show_login_form: Cell<bool>,
    bootstrapped: Cell<bool>,
}

impl<A: AuthApi, N: Navigator> AuthSessionController<A, N> {
    /// Wire a controller to its collaborators.
    #[must_use]
    pub fn new(
        api: A,
        navigator: N,
        session: Rc<SessionStore>,
        modals: Rc<ModalRegistry>,
    ) -> Self {
        Self {
            api,
            navigator,
            session,
            modals,
            show_login_form: Cell::new(false),
            bootstrapped: Cell::new(false),
        }
    }

    /// Shared session store.
    #[must_use]
    pub const fn session(&self) -> &Rc<SessionStore> {
        &self.session
    }

    /// Shared dialog registry.
    #[must_use]
    pub const fn modals(&self) -> &Rc<ModalRegistry> {
        &self.modals
    }

    /// Host navigator.
    #[must_use]
    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Whether the backend asked for the local login form.
    #[must_use]
    pub fn show_login_form(&self) -> bool {
        self.show_login_form.get()
    }

    /// Reconcile the client with the backend session. Runs once per load.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AlreadyBootstrapped`] on a second call.
    /// - [`AuthError::Transport`] when the status probe fails; no access is granted.
    /// - [`AuthError::ContractViolation`] when the probe reply has an unknown shape.
    pub async fn bootstrap(&self) -> AuthResult<BootstrapOutcome> {
        if self.bootstrapped.replace(true) {
            return Err(AuthError::AlreadyBootstrapped);
        }

        if self.session.is_authenticated() {
            self.navigator.navigate(View::Default, NavigationMode::Push);
            return Ok(BootstrapOutcome::AlreadyAuthenticated);
        }

        self.modals.close_all();

        let status = self.api.status().await.inspect_err(|err| {
            warn!(error = %err, "session probe failed");
        })?;

        match status {
            AuthStatus::ShowLocalForm => {
                debug!("backend requested the local login form");
                self.show_login_form.set(true);
                Ok(BootstrapOutcome::ShowLoginForm)
            }
            AuthStatus::ExternalRedirect(url) => {
                info!(login_url = %url, "delegating login to external identity provider");
                self.navigator.redirect(&url);
                Ok(BootstrapOutcome::ExternalRedirect(url))
            }
            AuthStatus::Authenticated(identity) => {
                let identity = self.establish(identity);
                Ok(BootstrapOutcome::Authenticated(identity))
            }
        }
    }

    /// Log in with `credentials` and route to the default view.
    ///
    /// # Errors
    ///
    /// Propagates transport and contract failures; the store is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> AuthResult<Rc<Identity>> {
        let response = self.api.login(credentials).await.inspect_err(|err| {
            debug!(username = %credentials.username, error = %err, "login rejected");
        })?;
        Ok(self.establish(response.into()))
    }

    /// Log out and redirect to the server-chosen landing page.
    ///
    /// Returns the redirect URL that was issued.
    ///
    /// # Errors
    ///
    /// See [`Self::logout_with`].
    pub async fn logout(&self) -> AuthResult<String> {
        self.logout_with(|| {}).await
    }

    /// Log out, running `on_complete` after the store is cleared and before the
    /// final redirect.
    ///
    /// # Errors
    ///
    /// - [`AuthError::LogoutInProgress`] while another logout is pending.
    /// - Transport and contract failures; the prior session state is restored.
    pub async fn logout_with<F: FnOnce()>(&self, on_complete: F) -> AuthResult<String> {
        let previous = self.session.begin_logout()?;
        let response = match self.api.logout().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "logout request failed");
                self.session.abort_logout(previous);
                return Err(err);
            }
        };

        self.navigator.navigate(View::Logout, NavigationMode::Replace);
        self.session.clear();
        on_complete();
        info!(redirect_url = %response.redirect_url, "logged out");
        self.navigator.redirect(&response.redirect_url);
        Ok(response.redirect_url)
    }

    fn establish(&self, identity: Identity) -> Rc<Identity> {
        let identity = self.session.install(identity);
        self.show_login_form.set(false);
        self.navigator.navigate(View::Default, NavigationMode::Push);
        identity
    }
}
