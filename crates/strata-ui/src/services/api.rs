//! gloo-net transport for the auth endpoints.

use async_trait::async_trait;
use gloo_net::http::Request;
use strata_auth::api::decode_json;
use strata_auth::{
    AUTH_LOGOUT_PATH, AUTH_PATH, AuthApi, AuthError, AuthResult, AuthStatus, Credentials,
    LoginResponse, LogoutResponse,
};

#[derive(Clone, Debug)]
pub(crate) struct GlooAuthApi {
    base_url: String,
}

impl GlooAuthApi {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn exchange(endpoint: &'static str, request: Request) -> AuthResult<Vec<u8>> {
    let response = request
        .send()
        .await
        .map_err(|err| AuthError::unreachable(endpoint, err.to_string()))?;
    if !response.ok() {
        return Err(AuthError::status(endpoint, response.status()));
    }
    response
        .binary()
        .await
        .map_err(|err| AuthError::unreachable(endpoint, err.to_string()))
}

#[async_trait(?Send)]
impl AuthApi for GlooAuthApi {
    async fn status(&self) -> AuthResult<AuthStatus> {
        let body = exchange(AUTH_PATH, Request::get(&self.url(AUTH_PATH))).await?;
        AuthStatus::from_slice(&body)
    }

    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse> {
        let request = Request::post(&self.url(AUTH_PATH))
            .json(credentials)
            .map_err(|err| AuthError::unreachable(AUTH_PATH, err.to_string()))?;
        let body = exchange(AUTH_PATH, request).await?;
        decode_json(AUTH_PATH, &body)
    }

    async fn logout(&self) -> AuthResult<LogoutResponse> {
        let body = exchange(AUTH_LOGOUT_PATH, Request::post(&self.url(AUTH_LOGOUT_PATH))).await?;
        decode_json(AUTH_LOGOUT_PATH, &body)
    }
}
