//! Shared client utilities, error types, and the reqwest-backed auth transport.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use strata_auth::api::decode_json;
use strata_auth::{
    AUTH_LOGOUT_PATH, AUTH_PATH, AuthApi, AuthError, AuthResult, AuthStatus, Credentials,
    LoginResponse, LogoutResponse,
};
use tracing::{debug, warn};

use crate::state::StateFile;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<AuthError> for CliError {
    /// Rejections the operator can fix (bad credentials, a pending logout)
    /// are validation errors; everything else is an operational failure.
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Transport {
                status: Some(400 | 401 | 403 | 422),
                ..
            }
            | AuthError::LogoutInProgress => Self::validation(err.to_string()),
            other => Self::failure(other),
        }
    }
}

/// Application context passed to command handlers.
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) jar: Arc<Jar>,
    pub(crate) state: StateFile,
}

impl AppContext {
    /// Build the HTTP client, restoring any session cookie saved by an
    /// earlier invocation.
    pub(crate) fn connect(
        base_url: Url,
        state: StateFile,
        timeout: Duration,
        trace_id: &str,
    ) -> CliResult<Self> {
        let jar = Arc::new(Jar::default());
        match state.cookie() {
            Ok(Some(cookie)) => restore_cookies(&jar, &cookie, &base_url),
            Ok(None) => {}
            Err(err) => warn!(error = %err, "ignoring unreadable session state"),
        }

        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            jar,
            state,
        })
    }

    /// Save the cookies the backend set for the API origin.
    pub(crate) fn persist_cookies(&self) -> CliResult<()> {
        let cookie = self
            .jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string));
        self.state
            .save_cookie(cookie.as_deref())
            .map_err(CliError::failure)
    }

    /// Drop the saved session cookie.
    pub(crate) fn forget_cookies(&self) -> CliResult<()> {
        self.state.save_cookie(None).map_err(CliError::failure)
    }

    /// Resolve a backend-supplied location (absolute or relative) against the
    /// API base.
    pub(crate) fn resolve(&self, location: &str) -> CliResult<Url> {
        resolve_url(&self.base_url, location)
    }
}

fn restore_cookies(jar: &Jar, header: &str, base_url: &Url) {
    for pair in header.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
        jar.add_cookie_str(pair, base_url);
    }
    debug!("restored session cookie");
}

/// Parse the API URL provided to the CLI. A trailing slash is added so the
/// auth paths resolve beneath it rather than beside it.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    let mut url = input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))?;
    if url.cannot_be_a_base() {
        return Err(format!("invalid URL '{input}': not a base URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Join `location` onto `base`; absolute locations replace it outright.
pub(crate) fn resolve_url(base: &Url, location: &str) -> CliResult<Url> {
    base.join(location)
        .map_err(|err| CliError::failure(anyhow!("invalid redirect location '{location}': {err}")))
}

/// [`AuthApi`] over reqwest. Session cookies ride along via the client's jar.
pub(crate) struct HttpAuthApi {
    client: Client,
    base_url: Url,
}

impl HttpAuthApi {
    pub(crate) fn new(ctx: &AppContext) -> Self {
        Self {
            client: ctx.client.clone(),
            base_url: ctx.base_url.clone(),
        }
    }

    fn endpoint(&self, path: &'static str) -> AuthResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| AuthError::unreachable(path, format!("invalid base URL: {err}")))
    }
}

async fn read_body(endpoint: &'static str, response: Response) -> AuthResult<Vec<u8>> {
    let status = response.status();
    if !status.is_success() {
        debug!(endpoint, status = status.as_u16(), "auth endpoint rejected request");
        return Err(AuthError::status(endpoint, status.as_u16()));
    }
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| AuthError::unreachable(endpoint, err.to_string()))
}

fn transport(endpoint: &'static str, err: &reqwest::Error) -> AuthError {
    AuthError::unreachable(endpoint, err.to_string())
}

#[async_trait(?Send)]
impl AuthApi for HttpAuthApi {
    async fn status(&self) -> AuthResult<AuthStatus> {
        let response = self
            .client
            .get(self.endpoint(AUTH_PATH)?)
            .send()
            .await
            .map_err(|err| transport(AUTH_PATH, &err))?;
        let body = read_body(AUTH_PATH, response).await?;
        AuthStatus::from_slice(&body)
    }

    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse> {
        let response = self
            .client
            .post(self.endpoint(AUTH_PATH)?)
            .json(credentials)
            .send()
            .await
            .map_err(|err| transport(AUTH_PATH, &err))?;
        let body = read_body(AUTH_PATH, response).await?;
        decode_json(AUTH_PATH, &body)
    }

    async fn logout(&self) -> AuthResult<LogoutResponse> {
        let response = self
            .client
            .post(self.endpoint(AUTH_LOGOUT_PATH)?)
            .send()
            .await
            .map_err(|err| transport(AUTH_LOGOUT_PATH, &err))?;
        let body = read_body(AUTH_LOGOUT_PATH, response).await?;
        decode_json(AUTH_LOGOUT_PATH, &body)
    }
}
