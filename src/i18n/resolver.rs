use tracing::warn;

pub const DEFAULT_LOCALE: &str = "en";

/// Resolves message keys to display text.
///
/// Arguments replace `%{name}` placeholders in the resolved text.
pub trait MessageResolver: Send + Sync + 'static {
    fn get(&self, key: &str) -> String;

    fn get_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut message = self.get(key);

        for (name, value) in args {
            message = message.replace(&format!("%{{{name}}}"), value);
        }

        message
    }
}

/// Resolver backed by the bundled `locales/*.yml` files.
///
/// The locale is fixed at construction and passed on every lookup, so the
/// global rust-i18n locale is never touched.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    locale: String
}

impl LocaleResolver {
    /// Creates a resolver for `locale`, falling back to English when the
    /// locale has no bundled translations.
    pub fn new(locale: &str) -> Self {
        let available = rust_i18n::available_locales!();

        let locale = if available.iter().any(|candidate| *candidate == locale) {
            locale.to_string()
        } else {
            warn!("Locale [{locale}] is not available, falling back to [{DEFAULT_LOCALE}]");
            DEFAULT_LOCALE.to_string()
        };

        Self { locale }
    }

    /// Locale actually in use after any fallback.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for LocaleResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl MessageResolver for LocaleResolver {
    fn get(&self, key: &str) -> String {
        rust_i18n::t!(key, locale = self.locale.as_str()).to_string()
    }
}
