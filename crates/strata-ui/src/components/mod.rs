use yew::prelude::*;

use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};

pub(crate) mod boot;
pub(crate) mod dashboard;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod modal;
pub(crate) mod password;
pub(crate) mod shell;

/// Active translation bundle, English when no provider is mounted.
#[hook]
pub(crate) fn use_bundle() -> TranslationBundle {
    use_context::<TranslationBundle>().unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE))
}
