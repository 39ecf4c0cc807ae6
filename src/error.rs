/// Error types for locale loading and switcher configuration
///
/// None of these reach a page visitor: the switcher recovers from every
/// loading error with embedded data. They surface in load reports, logs,
/// configuration constructors and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// Locale resource could not be reached (connection failure, timeout)
    Network(String),
    /// Locale resource answered with a non-success HTTP status
    Status(u16),
    /// Locale resource content is not a flat JSON object
    Parse(String),
    /// Local file or directory could not be read
    Io(String),
    /// Language code outside the supported set
    UnsupportedLanguage(String),
    /// Invalid configuration value
    Config(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            I18nError::Network(msg) => write!(f, "Network error: {}", msg),
            I18nError::Status(code) => write!(f, "Unexpected HTTP status: {}", code),
            I18nError::Parse(msg) => write!(f, "Malformed locale data: {}", msg),
            I18nError::Io(msg) => write!(f, "I/O error: {}", msg),
            I18nError::UnsupportedLanguage(code) => write!(f, "Unsupported language: {}", code),
            I18nError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for I18nError {}

impl From<reqwest::Error> for I18nError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return I18nError::Status(status.as_u16());
        }
        I18nError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for I18nError {
    fn from(err: serde_json::Error) -> Self {
        I18nError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for I18nError {
    fn from(err: std::io::Error) -> Self {
        I18nError::Io(err.to_string())
    }
}

/// Result type for locale operations
pub type I18nResult<T> = Result<T, I18nError>;
