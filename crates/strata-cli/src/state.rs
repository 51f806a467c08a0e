//! On-disk session state shared between CLI invocations.
//!
//! One small JSON document holds the last signed-in username (the CLI's
//! [`UsernameStorage`]) and the backend session cookie. Permissions are never
//! written; every command that needs them asks the backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_auth::{StorageError, UsernameStorage};
use tracing::warn;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cookie: Option<String>,
}

impl SessionDocument {
    const fn is_empty(&self) -> bool {
        self.username.is_none() && self.cookie.is_none()
    }
}

/// Handle to the session state file.
#[derive(Debug, Clone)]
pub(crate) struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Saved `Cookie` header value, if any.
    pub(crate) fn cookie(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.cookie)
    }

    /// Replace (or with `None`, drop) the saved cookie.
    pub(crate) fn save_cookie(&self, cookie: Option<&str>) -> Result<(), StorageError> {
        self.update(|document| document.cookie = cookie.map(str::to_string))
    }

    fn read(&self) -> Result<SessionDocument, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|_| StorageError::Corrupt),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(SessionDocument::default()),
            Err(err) => Err(self.unavailable(&err)),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut SessionDocument)) -> Result<(), StorageError> {
        let mut document = match self.read() {
            Ok(document) => document,
            Err(StorageError::Corrupt) => {
                warn!(path = %self.path.display(), "replacing corrupt session state");
                SessionDocument::default()
            }
            Err(err) => return Err(err),
        };
        apply(&mut document);
        self.write(&document)
    }

    fn write(&self, document: &SessionDocument) -> Result<(), StorageError> {
        if document.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                Err(err) => Err(self.unavailable(&err)),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.unavailable(&err))?;
        }
        let bytes = serde_json::to_vec_pretty(document).map_err(|err| StorageError::Unavailable {
            detail: err.to_string(),
        })?;
        fs::write(&self.path, bytes).map_err(|err| self.unavailable(&err))?;
        restrict_permissions(&self.path).map_err(|err| self.unavailable(&err))
    }

    fn unavailable(&self, err: &std::io::Error) -> StorageError {
        StorageError::Unavailable {
            detail: format!("{}: {err}", self.path.display()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl UsernameStorage for StateFile {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.username)
    }

    fn save(&self, username: &str) -> Result<(), StorageError> {
        self.update(|document| document.username = Some(username.to_string()))
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.update(|document| document.username = None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::temp_state;
    use anyhow::Result;

    #[test]
    fn missing_file_reads_as_empty() -> Result<()> {
        let state = temp_state("missing");
        assert_eq!(state.load()?, None);
        assert_eq!(state.cookie()?, None);
        state.remove()?;
        assert!(!state.path().exists());
        Ok(())
    }

    #[test]
    fn username_and_cookie_are_independent() -> Result<()> {
        let state = temp_state("independent");
        state.save("alice")?;
        state.save_cookie(Some("strata_session=abc"))?;
        assert_eq!(state.load()?.as_deref(), Some("alice"));

        state.remove()?;
        assert_eq!(state.load()?, None);
        assert_eq!(state.cookie()?.as_deref(), Some("strata_session=abc"));

        state.save_cookie(None)?;
        assert!(!state.path().exists());
        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported_then_replaced() -> Result<()> {
        let state = temp_state("corrupt");
        if let Some(parent) = state.path().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(state.path(), b"{not json")?;
        assert!(matches!(state.load(), Err(StorageError::Corrupt)));

        state.save("bob")?;
        assert_eq!(state.load()?.as_deref(), Some("bob"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn state_file_is_private() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let state = temp_state("private");
        state.save_cookie(Some("strata_session=abc"))?;
        let mode = fs::metadata(state.path())?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }
}
