//! Identity, permission, and wire types for the console's `/auth` endpoints.
//!
//! # Design
//! - `/auth` replies are decoded at the boundary into [`AuthStatus`], a closed
//!   three-variant union, so callers never branch on field presence.
//! - [`PermissionSet`] is immutable once built; a new login replaces it wholesale.
//! - [`Credentials`] never print their password through `Debug`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::api::AUTH_PATH;
use crate::error::{AuthError, AuthResult};

/// `login_url` value instructing the client to render its own login form.
pub const LOCAL_LOGIN_MARKER: &str = "#/login";

/// Operation a permission grants on a resource scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// View the resource.
    Read,
    /// Create new instances of the resource.
    Create,
    /// Modify existing instances.
    Update,
    /// Remove instances.
    Delete,
}

impl Action {
    /// All actions in canonical order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Read, Self::Create, Self::Update, Self::Delete]
    }

    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Mapping from resource scope (`user`, `pool`, `grafana`, ...) to allowed actions.
///
/// An empty set means "no access"; it is never an error signal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<String, BTreeSet<Action>>);

impl PermissionSet {
    /// The empty permission set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Whether no scope grants any action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Whether `action` is allowed on `scope`.
    #[must_use]
    pub fn allows(&self, scope: &str, action: Action) -> bool {
        self.0
            .get(scope)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Shorthand for [`Action::Read`] checks used by navigation gating.
    #[must_use]
    pub fn can_read(&self, scope: &str) -> bool {
        self.allows(scope, Action::Read)
    }

    /// Iterate scopes with their allowed actions in scope order.
    pub fn scopes(&self) -> impl Iterator<Item = (&str, &BTreeSet<Action>)> {
        self.0.iter().map(|(scope, actions)| (scope.as_str(), actions))
    }
}

impl<S, I> FromIterator<(S, I)> for PermissionSet
where
    S: Into<String>,
    I: IntoIterator<Item = Action>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(scope, actions)| (scope.into(), actions.into_iter().collect()))
                .collect(),
        )
    }
}

/// Authenticated operator: username plus resolved permissions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Login name.
    pub username: String,
    /// Permissions resolved by the backend for this login.
    pub permissions: PermissionSet,
}

impl Identity {
    /// Build an identity from its parts.
    #[must_use]
    pub fn new(username: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            username: username.into(),
            permissions,
        }
    }
}

/// Login form input. Exists only for the duration of a login request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Keep the backend session alive past browser close.
    pub stay_signed_in: bool,
}

impl Credentials {
    /// Build credentials without the stay-signed-in flag.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            stay_signed_in: false,
        }
    }

    /// Request a persistent backend session.
    #[must_use]
    pub const fn stay_signed_in(mut self, value: bool) -> Self {
        self.stay_signed_in = value;
        self
    }
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("stay_signed_in", &self.stay_signed_in)
            .finish()
    }
}

/// Raw `GET /auth` body before shape validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AuthStatusPayload {
    /// Where the operator should log in, when no session exists.
    pub login_url: Option<String>,
    /// Session owner, when a session exists.
    pub username: Option<String>,
    /// Session permissions, when a session exists.
    pub permissions: Option<PermissionSet>,
}

/// Decoded `GET /auth` reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    /// No session; render the local login form.
    ShowLocalForm,
    /// No session; login is delegated to an external identity provider.
    ExternalRedirect(String),
    /// A session exists for this identity.
    Authenticated(Identity),
}

impl AuthStatus {
    /// Decode a `GET /auth` response body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ContractViolation`] when the body is not JSON or
    /// matches none of the three known shapes.
    pub fn from_slice(body: &[u8]) -> AuthResult<Self> {
        let payload: AuthStatusPayload = crate::api::decode_json(AUTH_PATH, body)?;
        Self::try_from(payload)
    }
}

impl TryFrom<AuthStatusPayload> for AuthStatus {
    type Error = AuthError;

    fn try_from(payload: AuthStatusPayload) -> AuthResult<Self> {
        match payload {
            AuthStatusPayload {
                login_url: Some(url),
                ..
            } => {
                if url.trim().is_empty() {
                    Err(AuthError::contract(AUTH_PATH, "login_url is empty"))
                } else if url == LOCAL_LOGIN_MARKER {
                    Ok(Self::ShowLocalForm)
                } else {
                    Ok(Self::ExternalRedirect(url))
                }
            }
            AuthStatusPayload {
                login_url: None,
                username: Some(username),
                permissions: Some(permissions),
            } if !username.trim().is_empty() => {
                Ok(Self::Authenticated(Identity::new(username, permissions)))
            }
            AuthStatusPayload {
                username: Some(_),
                permissions: None,
                ..
            } => Err(AuthError::contract(
                AUTH_PATH,
                "username present without permissions",
            )),
            AuthStatusPayload {
                username: Some(_), ..
            } => Err(AuthError::contract(AUTH_PATH, "username is empty")),
            AuthStatusPayload { username: None, .. } => Err(AuthError::contract(
                AUTH_PATH,
                "neither login_url nor username present",
            )),
        }
    }
}

/// `POST /auth` success body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Authenticated login name.
    pub username: String,
    /// Permissions granted to the session.
    pub permissions: PermissionSet,
}

impl From<LoginResponse> for Identity {
    fn from(response: LoginResponse) -> Self {
        Self::new(response.username, response.permissions)
    }
}

/// `POST /auth/logout` success body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LogoutResponse {
    /// Server-chosen landing page (local login route or an SSO logout endpoint).
    pub redirect_url: String,
}
