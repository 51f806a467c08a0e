//! Backend auth API seam.
//!
//! Transports (reqwest in the CLI, gloo-net in the browser) implement
//! [`AuthApi`]; the controller never sees raw HTTP.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AuthError, AuthResult};
use crate::model::{AuthStatus, Credentials, LoginResponse, LogoutResponse};

/// `GET` reports the current login state; `POST` performs a login.
pub const AUTH_PATH: &str = "auth";
/// `POST` ends the current session.
pub const AUTH_LOGOUT_PATH: &str = "auth/logout";

/// The three auth endpoints consumed by the console.
///
/// Every call is attempted exactly once; retry policy belongs to callers.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `GET /auth`, decoded into one of the three status shapes.
    async fn status(&self) -> AuthResult<AuthStatus>;

    /// `POST /auth` with the operator's credentials.
    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse>;

    /// `POST /auth/logout` with an empty body.
    async fn logout(&self) -> AuthResult<LogoutResponse>;
}

/// Decode a JSON body, mapping malformed payloads to contract violations.
///
/// # Errors
///
/// Returns [`AuthError::ContractViolation`] when the body does not decode as `T`.
pub fn decode_json<T: DeserializeOwned>(endpoint: &'static str, body: &[u8]) -> AuthResult<T> {
    serde_json::from_slice(body).map_err(|err| AuthError::contract(endpoint, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_json_maps_errors_to_contract_violations() {
        let err = decode_json::<LogoutResponse>(AUTH_LOGOUT_PATH, b"{}")
            .expect_err("redirect_url is required");
        assert!(matches!(
            err,
            AuthError::ContractViolation {
                endpoint: AUTH_LOGOUT_PATH,
                ..
            }
        ));
    }

    #[test]
    fn decode_json_reads_logout_body() -> AuthResult<()> {
        let body: LogoutResponse =
            decode_json(AUTH_LOGOUT_PATH, br#"{"redirect_url":"auth/saml2/slo"}"#)?;
        assert_eq!(body.redirect_url, "auth/saml2/slo");
        Ok(())
    }
}
