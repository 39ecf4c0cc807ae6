use crate::error::{I18nError, I18nResult};
use crate::language::Language;
use std::time::Duration;

/// Attribute names the switcher reads from page markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAttributes {
    /// Translation key for an element's text content
    pub text: String,
    /// Translation key for an element's `title` attribute
    pub title: String,
    /// Translation key for an element's `aria-label` attribute
    pub aria_label: String,
    /// Language code activated by a language-selection control
    pub control: String,
}

impl Default for MarkerAttributes {
    fn default() -> Self {
        Self {
            text: "data-i18n".to_string(),
            title: "data-i18n-title".to_string(),
            aria_label: "data-i18n-aria-label".to_string(),
            control: "data-lang-btn".to_string(),
        }
    }
}

/// What an element shows when its key is missing from the active table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
    /// Leave the current content untouched
    #[default]
    Keep,
    /// Show the raw key
    EchoKey,
}

/// Switcher settings
///
/// `Default` matches the portfolio page as deployed; `from_env` lets the CLI
/// and embedding applications override the deployment-specific parts.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitcherConfig {
    /// Language used when neither storage nor browser yields a supported one
    pub default_language: Language,
    /// Preference storage key
    pub storage_key: String,
    /// Document base URL locale files are resolved against
    pub base_url: Option<String>,
    /// Directory of the locale files relative to the base URL
    pub locales_path: String,
    /// Upper bound for one locale request
    pub request_timeout: Duration,
    pub markers: MarkerAttributes,
    pub missing_key_policy: MissingKeyPolicy,
    /// Class toggled on the active language control
    pub active_class: String,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            default_language: Language::De,
            storage_key: "lang".to_string(),
            base_url: None,
            locales_path: "locales".to_string(),
            request_timeout: Duration::from_secs(30),
            markers: MarkerAttributes::default(),
            missing_key_policy: MissingKeyPolicy::Keep,
            active_class: "active".to_string(),
        }
    }
}

impl SwitcherConfig {
    pub const ENV_BASE_URL: &'static str = "PORTFOLIO_I18N_BASE_URL";
    pub const ENV_STORAGE_KEY: &'static str = "PORTFOLIO_I18N_STORAGE_KEY";
    pub const ENV_DEFAULT_LANG: &'static str = "PORTFOLIO_I18N_DEFAULT_LANG";
    pub const ENV_TIMEOUT_SECS: &'static str = "PORTFOLIO_I18N_TIMEOUT_SECS";

    /// Defaults overridden by `PORTFOLIO_I18N_*` environment variables
    ///
    /// # Errors
    ///
    /// `Config` when a variable is set to an unusable value.
    pub fn from_env() -> I18nResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> I18nResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(Self::ENV_BASE_URL) {
            config.base_url = Some(url);
        }

        if let Some(key) = lookup(Self::ENV_STORAGE_KEY) {
            if key.trim().is_empty() {
                return Err(I18nError::Config(format!(
                    "{} cannot be empty",
                    Self::ENV_STORAGE_KEY
                )));
            }
            config.storage_key = key;
        }

        if let Some(code) = lookup(Self::ENV_DEFAULT_LANG) {
            config.default_language = code.parse().map_err(|_| {
                I18nError::Config(format!(
                    "{} must be one of de, en (got '{}')",
                    Self::ENV_DEFAULT_LANG,
                    code
                ))
            })?;
        }

        if let Some(secs) = lookup(Self::ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                I18nError::Config(format!(
                    "{} must be a whole number of seconds (got '{}')",
                    Self::ENV_TIMEOUT_SECS,
                    secs
                ))
            })?;
            if secs == 0 {
                return Err(I18nError::Config(format!(
                    "{} must be greater than zero",
                    Self::ENV_TIMEOUT_SECS
                )));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
