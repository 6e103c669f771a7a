use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// 表單欄位錯誤：欄位名稱 -> 顯示訊息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: &str) {
        // 每個欄位只保留第一個錯誤
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum HrError {
    /// 伺服器回傳非 2xx，message 優先取自回應 body 的 `message` 欄位
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {message}")]
    TomlParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    ValidationError { field: String, message: String },

    /// 讀取失敗時 store 只保留訊息文字
    #[error("{message}")]
    LoadFailed { resource: String, message: String },

    #[error("Form validation failed: {0}")]
    FormValidation(FieldErrors),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Configuration,
    Validation,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HrError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        HrError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HrError::Api { .. } | HrError::LoadFailed { .. } => ErrorCategory::Server,
            HrError::Http(_) => ErrorCategory::Network,
            HrError::TomlParseError { .. }
            | HrError::ConfigError { .. }
            | HrError::MissingConfigError { .. }
            | HrError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            HrError::ValidationError { .. } | HrError::FormValidation(_) => {
                ErrorCategory::Validation
            }
            HrError::IoError(_) | HrError::SerializationError(_) | HrError::CsvError(_) => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HrError::ValidationError { .. } | HrError::FormValidation(_) => ErrorSeverity::High,
            HrError::Api { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            HrError::Api { .. } | HrError::LoadFailed { .. } => ErrorSeverity::High,
            HrError::Http(_) => ErrorSeverity::Medium,
            HrError::IoError(_) | HrError::SerializationError(_) | HrError::CsvError(_) => {
                ErrorSeverity::High
            }
            HrError::TomlParseError { .. }
            | HrError::ConfigError { .. }
            | HrError::MissingConfigError { .. }
            | HrError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            HrError::Api { message, .. } => message.clone(),
            HrError::Http(e) => e.to_string(),
            HrError::FormValidation(errors) => {
                let lines: Vec<String> = errors.iter().map(|(_, msg)| msg.to_string()).collect();
                lines.join(", ")
            }
            HrError::MissingConfigError { field } => {
                format!("Required setting `{}` is not configured", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API server is reachable and try again",
            ErrorCategory::Server => "Review the server message and correct the submitted data",
            ErrorCategory::Configuration => {
                "Check hr-admin.toml, --api-base-url or the HR_API_BASE_URL environment variable"
            }
            ErrorCategory::Validation => "Fill in the required fields and submit again",
            ErrorCategory::Data => "Check the input file path and its format",
        }
    }
}

pub type Result<T> = std::result::Result<T, HrError>;
