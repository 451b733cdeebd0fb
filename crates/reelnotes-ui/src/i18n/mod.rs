//! Display languages supported by the site.
//!
//! Page text is rendered server-side for the session language; the client
//! only tracks which language is active, mirrors it into the document and
//! asks the server to switch.

use serde::{Deserialize, Serialize};

/// Supported locale codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleCode {
    /// English.
    En,
    /// Chinese (Simplified).
    Zh,
}

impl LocaleCode {
    /// All supported locales in display order.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::En, Self::Zh]
    }

    /// Two-letter code used for `lang` attributes, storage and the server route.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Short badge shown on the language toggle.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Zh => "ZH",
        }
    }

    /// The language the toggle switches to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Zh,
            Self::Zh => Self::En,
        }
    }

    /// Map an arbitrary language tag (`zh-CN`, `EN`) to a supported locale.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Option<Self> {
        let lowered = tag.trim().to_ascii_lowercase();
        let base = lowered.split(['-', '_']).next().unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.code() == base)
    }
}

/// Default fallback locale.
pub const DEFAULT_LOCALE: LocaleCode = LocaleCode::En;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_tags_map_to_base_locale() {
        assert_eq!(LocaleCode::from_lang_tag("zh-CN"), Some(LocaleCode::Zh));
        assert_eq!(LocaleCode::from_lang_tag("EN"), Some(LocaleCode::En));
        assert_eq!(LocaleCode::from_lang_tag("fr"), None);
    }

    #[test]
    fn toggle_alternates_between_locales() {
        assert_eq!(LocaleCode::En.toggled(), LocaleCode::Zh);
        assert_eq!(LocaleCode::Zh.toggled().badge(), "EN");
    }
}
