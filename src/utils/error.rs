use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhitelistError {
    #[error("Cannot open phone book '{}': {source}", path.display())]
    PhoneBookOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("row has {fields} field(s); expected at least 3")]
    MalformedRow { fields: usize },

    #[error("API request failed: {0}")]
    ApiError(reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    ApiResponse { status: u16, body: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WhitelistError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::PhoneBookOpen { .. } | Self::CsvError(_) | Self::MalformedRow { .. } => {
                ErrorCategory::Input
            }
            Self::ApiError(_) | Self::ApiResponse { .. } | Self::SerializationError(_) => {
                ErrorCategory::Network
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        if let Self::MalformedRow { .. } = self {
            return ErrorSeverity::Low;
        }
        match self.category() {
            // 單筆 API 失敗只影響該行
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::PhoneBookOpen { path, .. } => {
                format!("Phone book '{}' could not be opened", path.display())
            }
            Self::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::ApiResponse { status, .. } => {
                format!("The VoIP provider answered with HTTP {}", status)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the TOML configuration file and required environment variables"
            }
            ErrorCategory::Input => "Check that the phone book path exists and is readable",
            ErrorCategory::Network => {
                "Check API credentials, that API access is enabled, and network connectivity"
            }
            ErrorCategory::System => "Check disk space and permissions of the log directory",
        }
    }
}

// 請求 URL 帶有 api_password，錯誤訊息中不得保留
impl From<reqwest::Error> for WhitelistError {
    fn from(e: reqwest::Error) -> Self {
        Self::ApiError(e.without_url())
    }
}

impl WhitelistError {
    /// Input could not be read at all; the run stops instead of counting a row.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::CsvError(e) if e.is_io_error())
    }
}

pub type Result<T> = std::result::Result<T, WhitelistError>;
