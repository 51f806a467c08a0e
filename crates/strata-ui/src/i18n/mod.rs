//! JSON-backed translations with per-locale bundles and English fallback.

use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

/// Locales shipped with the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// German.
    De,
    /// French.
    Fr,
    /// Arabic.
    Ar,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::En, Self::De, Self::Fr, Self::Ar]
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Ar => "ar",
        }
    }

    /// Native name for the locale picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::De => "Deutsch",
            Self::Fr => "Français",
            Self::Ar => "العربية",
        }
    }

    /// Map a browser language tag (`de-CH`, `fr`) onto a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .into_iter()
            .find(|locale| locale.code() == base)
    }
}

/// Locale used when neither preference nor browser language matches.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

/// English password policy shown when no bundle carries `password.rules`.
pub const PASSWORD_RULES_DEFAULT: &str = "The password must not contain the username or product \
keywords. Strength grows with length and with the use of several character groups: a-z, A-Z, \
0-9, punctuation, and other characters.";

/// Parsed translation tree for one locale.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Locale backing this bundle.
    pub locale: LocaleCode,
    tree: Value,
    rtl: bool,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Load the bundle for `locale`. Keys it lacks resolve through English.
    #[must_use]
    pub fn new(locale: LocaleCode) -> Self {
        let tree: Value = serde_json::from_str(raw_locale(locale)).unwrap_or(Value::Null);
        let rtl = tree
            .get("meta")
            .and_then(|meta| meta.get("rtl"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Self { locale, tree, rtl }
    }

    /// Resolve a dotted key (`login.error.invalid`), falling back to English
    /// and then to `default`.
    #[must_use]
    pub fn text(&self, path: &str, default: &str) -> String {
        resolve(&self.tree, path)
            .or_else(|| resolve(&EN_FALLBACK.tree, path))
            .unwrap_or_else(|| default.to_string())
    }

    /// Whether the locale lays out right-to-left.
    #[must_use]
    pub const fn rtl(&self) -> bool {
        self.rtl
    }
}

static EN_FALLBACK: LazyLock<TranslationBundle> =
    LazyLock::new(|| TranslationBundle::new(LocaleCode::En));

fn resolve(tree: &Value, path: &str) -> Option<String> {
    let mut node = tree;
    for segment in path.split('.') {
        node = node.get(segment)?;
    }
    node.as_str().map(ToString::to_string)
}

const fn raw_locale(locale: LocaleCode) -> &'static str {
    match locale {
        LocaleCode::En => include_str!("../../i18n/en.json"),
        LocaleCode::De => include_str!("../../i18n/de.json"),
        LocaleCode::Fr => include_str!("../../i18n/fr.json"),
        LocaleCode::Ar => include_str!("../../i18n/ar.json"),
    }
}
