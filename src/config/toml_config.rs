use crate::domain::model::RoutingSettings;
use crate::utils::error::{Result, WhitelistError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PHONE_BOOK: &str = "VOIPMSphonebook.csv";
pub const DEFAULT_API_ENDPOINT: &str = "https://voip.ms/api/v1/rest.php";

#[derive(Debug, Clone, Deserialize)]
pub struct WhitelistConfig {
    #[serde(default = "default_phone_book")]
    pub phone_book: PathBuf,
    pub routing: RoutingSettings,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
}

#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_phone_book() -> PathBuf {
    PathBuf::from(DEFAULT_PHONE_BOOK)
}

fn default_true() -> bool {
    true
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: default_log_directory(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_api_endpoint(),
            username: String::new(),
            password: String::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// 密碼不得出現在日誌中
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl WhitelistConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WhitelistError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WhitelistError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VOIPMS_API_PASSWORD})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WhitelistError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_enabled(&self) -> bool {
        self.log.enabled
    }
}

impl Validate for WhitelistConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("phone_book", &self.phone_book.to_string_lossy())?;
        validation::validate_non_empty_string("routing.target", &self.routing.target)?;
        validation::validate_substituted("routing.target", &self.routing.target)?;
        validation::validate_non_empty_string("routing.did", &self.routing.did)?;

        if self.log.enabled {
            validation::validate_path("log.directory", &self.log.directory.to_string_lossy())?;
        }

        validation::validate_url("api.endpoint", &self.api.endpoint)?;
        validation::validate_positive_number("api.timeout_seconds", self.api.timeout_seconds, 1)?;
        Ok(())
    }
}

/// Credentials are only needed when filters are actually submitted.
impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        for (field, value) in [("api.username", &self.username), ("api.password", &self.password)] {
            validation::validate_substituted(field, value)?;
            if value.trim().is_empty() {
                return Err(WhitelistError::MissingConfigError {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}
