//! Persistence and environment helpers for the app shell.

use anyhow::anyhow;
use gloo::console;
use gloo::storage::errors::StorageError as BrowserStorageError;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use strata_auth::{StorageError, UsernameStorage};
use wasm_bindgen::JsValue;

use crate::i18n::{DEFAULT_LOCALE, LocaleCode};

pub(crate) const LOCALE_KEY: &str = "strata.locale";
pub(crate) const USERNAME_KEY: &str = "strata.auth.username";

const FALLBACK_API_BASE: &str = "/api/";

pub(crate) fn load_locale() -> LocaleCode {
    if let Ok(value) = LocalStorage::get::<String>(LOCALE_KEY) {
        if let Some(locale) = LocaleCode::from_lang_tag(&value) {
            return locale;
        }
    }
    if let Some(tag) = window().navigator().language() {
        if let Some(locale) = LocaleCode::from_lang_tag(&tag) {
            return locale;
        }
    }
    DEFAULT_LOCALE
}

pub(crate) fn persist_locale(locale: LocaleCode) {
    if let Err(err) = LocalStorage::set(LOCALE_KEY, locale.code()) {
        log_storage_error("set", LOCALE_KEY, &err.to_string());
    }
}

/// `<origin>/api/`, the base every auth endpoint is resolved against.
pub(crate) fn api_base_url() -> String {
    match window().location().origin() {
        Ok(origin) => format!("{origin}{FALLBACK_API_BASE}"),
        Err(err) => {
            console::error!("cannot read window origin", js_error(&err).to_string());
            FALLBACK_API_BASE.to_string()
        }
    }
}

pub(crate) fn js_error(err: &JsValue) -> anyhow::Error {
    anyhow!(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}

/// Last signed-in username in `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalUsernameStorage;

impl UsernameStorage for LocalUsernameStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match LocalStorage::get::<String>(USERNAME_KEY) {
            Ok(username) => Ok(Some(username)),
            Err(BrowserStorageError::KeyNotFound(_)) => Ok(None),
            Err(BrowserStorageError::SerdeError(_)) => Err(StorageError::Corrupt),
            Err(err) => Err(StorageError::Unavailable {
                detail: err.to_string(),
            }),
        }
    }

    fn save(&self, username: &str) -> Result<(), StorageError> {
        LocalStorage::set(USERNAME_KEY, username).map_err(|err| StorageError::Unavailable {
            detail: err.to_string(),
        })
    }

    fn remove(&self) -> Result<(), StorageError> {
        LocalStorage::delete(USERNAME_KEY);
        Ok(())
    }
}
