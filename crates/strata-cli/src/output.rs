//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use serde::Serialize;
use strata_auth::{BootstrapOutcome, Identity, PermissionSet, StrengthResult};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Session summary shared by `login`, `status`, and `logout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SessionReport {
    pub(crate) state: SessionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) permissions: Option<PermissionSet>,
    /// Where the operator continues in a browser, already resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SessionKind {
    Authenticated,
    LoginRequired,
    ExternalLogin,
    SignedOut,
}

impl SessionKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Authenticated => "authenticated",
            Self::LoginRequired => "login required",
            Self::ExternalLogin => "external login",
            Self::SignedOut => "signed out",
        }
    }
}

impl SessionReport {
    pub(crate) fn authenticated(identity: &Identity) -> Self {
        Self {
            state: SessionKind::Authenticated,
            username: Some(identity.username.clone()),
            permissions: Some(identity.permissions.clone()),
            location: None,
        }
    }

    pub(crate) fn signed_out(location: Option<String>) -> Self {
        Self {
            state: SessionKind::SignedOut,
            username: None,
            permissions: None,
            location,
        }
    }

    /// Summarise a reconciliation outcome. `location` is the resolved
    /// redirect target, if the controller issued one.
    pub(crate) fn from_outcome(outcome: &BootstrapOutcome, location: Option<String>) -> Self {
        match outcome {
            BootstrapOutcome::Authenticated(identity) => Self::authenticated(identity),
            BootstrapOutcome::AlreadyAuthenticated => Self {
                state: SessionKind::Authenticated,
                username: None,
                permissions: None,
                location: None,
            },
            BootstrapOutcome::ShowLoginForm => Self {
                state: SessionKind::LoginRequired,
                username: None,
                permissions: None,
                location: None,
            },
            BootstrapOutcome::ExternalRedirect(url) => Self {
                state: SessionKind::ExternalLogin,
                username: None,
                permissions: None,
                location: location.or_else(|| Some(url.clone())),
            },
        }
    }
}

pub(crate) fn format_session(report: &SessionReport, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Table => {
            let mut text = format!("state: {}", report.state.as_str());
            if let Some(username) = &report.username {
                let _ = write!(text, "\nusername: {username}");
            }
            if let Some(permissions) = &report.permissions {
                text.push_str("\npermissions:");
                let lines = permission_lines(permissions);
                if lines.is_empty() {
                    text.push_str(" none");
                }
                for line in lines {
                    let _ = write!(text, "\n  {line}");
                }
            }
            if let Some(location) = &report.location {
                let _ = write!(text, "\ncontinue at: {location}");
            }
            Ok(text)
        }
    }
}

pub(crate) fn format_whoami(username: Option<&str>, format: OutputFormat) -> CliResult<String> {
    #[derive(Serialize)]
    struct Whoami<'a> {
        username: Option<&'a str>,
        verified: bool,
    }

    match format {
        OutputFormat::Json => to_json(&Whoami {
            username,
            verified: false,
        }),
        OutputFormat::Table => Ok(username.map_or_else(
            || "not signed in".to_string(),
            |name| format!("{name} (unverified; run `strata status` to confirm)"),
        )),
    }
}

pub(crate) fn format_strength(result: &StrengthResult, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(result),
        OutputFormat::Table => Ok(format!(
            "strength: {} (tier {} of 4, credit {})",
            result.descriptor.default_label(),
            result.tier,
            result.credit
        )),
    }
}

fn permission_lines(permissions: &PermissionSet) -> Vec<String> {
    let width = permissions
        .scopes()
        .map(|(scope, _)| scope.len())
        .max()
        .unwrap_or(0);
    permissions
        .scopes()
        .map(|(scope, actions)| {
            let actions = actions
                .iter()
                .map(|action| action.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{scope:<width$}  {actions}")
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::rc::Rc;
    use strata_auth::{Action, score};

    fn operator() -> Identity {
        Identity::new(
            "alice",
            [
                ("cluster", vec![Action::Read]),
                ("pool", vec![Action::Read, Action::Update]),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn session_table_lists_permissions_by_scope() -> CliResult<()> {
        let text = format_session(&SessionReport::authenticated(&operator()), OutputFormat::Table)?;
        assert_eq!(
            text,
            "state: authenticated\nusername: alice\npermissions:\n  cluster  read\n  pool     read, update"
        );
        Ok(())
    }

    #[test]
    fn session_table_marks_empty_permissions() -> CliResult<()> {
        let identity = Identity::new("bob", PermissionSet::empty());
        let text = format_session(&SessionReport::authenticated(&identity), OutputFormat::Table)?;
        assert!(text.ends_with("permissions: none"));
        Ok(())
    }

    #[test]
    fn session_json_omits_absent_fields() -> CliResult<()> {
        let report = SessionReport::from_outcome(
            &BootstrapOutcome::ExternalRedirect("auth/saml2/login".to_string()),
            Some("https://cluster.local/api/auth/saml2/login".to_string()),
        );
        let value: Value = serde_json::from_str(&format_session(&report, OutputFormat::Json)?)
            .map_err(CliError::failure)?;
        assert_eq!(
            value,
            json!({
                "state": "external_login",
                "location": "https://cluster.local/api/auth/saml2/login"
            })
        );
        Ok(())
    }

    #[test]
    fn outcome_with_identity_reports_permissions() {
        let report =
            SessionReport::from_outcome(&BootstrapOutcome::Authenticated(Rc::new(operator())), None);
        assert_eq!(report.state, SessionKind::Authenticated);
        assert!(
            report
                .permissions
                .is_some_and(|permissions| permissions.allows("pool", Action::Update))
        );
    }

    #[test]
    fn whoami_is_marked_unverified() -> CliResult<()> {
        assert_eq!(format_whoami(None, OutputFormat::Table)?, "not signed in");
        assert!(format_whoami(Some("alice"), OutputFormat::Table)?.contains("unverified"));
        let value: Value = serde_json::from_str(&format_whoami(Some("alice"), OutputFormat::Json)?)
            .map_err(CliError::failure)?;
        assert_eq!(value, json!({"username": "alice", "verified": false}));
        Ok(())
    }

    #[test]
    fn strength_renders_label_and_tier() -> CliResult<()> {
        let result = score("aaaaaaaaaa");
        assert_eq!(
            format_strength(&result, OutputFormat::Table)?,
            "strength: Weak (tier 1 of 4, credit 10)"
        );
        let value: Value = serde_json::from_str(&format_strength(&result, OutputFormat::Json)?)
            .map_err(CliError::failure)?;
        assert_eq!(value, json!({"tier": 1, "descriptor": "weak", "credit": 10}));
        Ok(())
    }
}
