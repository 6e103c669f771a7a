#[cfg(feature = "cli")]
pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "hr-admin.toml";
pub const BASE_URL_ENV: &str = "HR_API_BASE_URL";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

/// 合併 CLI、設定檔與環境變數後的 API 設定
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub headers: HashMap<String, String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HrError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 指定了路徑就必須存在；沒指定時才嘗試目前目錄的 hr-admin.toml
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HrError::TomlParseError {
            message: e.to_string(),
        })
    }

    /// 替換環境變數 (例如 ${API_TOKEN})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HrError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 優先順序：CLI 參數 > 設定檔 > HR_API_BASE_URL
    pub fn resolve_api(&self, cli_base_url: Option<&str>) -> Result<ApiSettings> {
        let base_url = cli_base_url
            .map(str::to_string)
            .or_else(|| self.api.base_url.clone())
            .or_else(|| std::env::var(BASE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty());
        let base_url = validation::validate_required("api.base_url", &base_url)?;

        let settings = ApiSettings {
            base_url: base_url.trim().to_string(),
            timeout_seconds: self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            headers: self.api.headers.clone().unwrap_or_default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.base_url)?;
        validation::validate_positive_number("api.timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}

impl ConfigProvider for ApiSettings {
    fn api_base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn default_headers(&self) -> HashMap<String, String> {
        self.headers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://hr.example.com/api"
timeout_seconds = 10

[api.headers]
Authorization = "Bearer abc"

[logging]
verbose = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let api = config.resolve_api(None).unwrap();

        assert_eq!(api.base_url, "https://hr.example.com/api");
        assert_eq!(api.timeout_seconds, 10);
        assert_eq!(api.headers.get("Authorization").map(String::as_str), Some("Bearer abc"));
        assert!(config.verbose());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HR_ADMIN_TEST_TOKEN", "token-123");

        let toml_content = r#"
[api]
base_url = "http://localhost:8000"

[api.headers]
Authorization = "Bearer ${HR_ADMIN_TEST_TOKEN}"
X-Missing = "${HR_ADMIN_TEST_MISSING}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let headers = config.api.headers.unwrap();
        assert_eq!(headers["Authorization"], "Bearer token-123");
        assert_eq!(headers["X-Missing"], "${HR_ADMIN_TEST_MISSING}");

        std::env::remove_var("HR_ADMIN_TEST_TOKEN");
    }

    #[test]
    fn test_cli_url_wins_over_file() {
        let config = AppConfig::from_toml_str("[api]\nbase_url = \"http://file.local\"\n").unwrap();
        let api = config.resolve_api(Some("http://cli.local")).unwrap();
        assert_eq!(api.base_url, "http://cli.local");
        assert_eq!(api.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let config = AppConfig::from_toml_str(
            "[api]\nbase_url = \"ftp://files.local\"\ntimeout_seconds = 5\n",
        )
        .unwrap();
        assert!(matches!(
            config.resolve_api(None),
            Err(HrError::InvalidConfigValueError { .. })
        ));

        let config =
            AppConfig::from_toml_str("[api]\nbase_url = \"http://a.local\"\ntimeout_seconds = 0\n")
                .unwrap();
        assert!(config.resolve_api(None).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("[api\nbase_url = 1"),
            Err(HrError::TomlParseError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"http://from-file.local\"\n")
            .unwrap();

        let config = AppConfig::load(Some(temp_file.path())).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://from-file.local"));
    }
}
