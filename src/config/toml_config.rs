use crate::core::ConfigProvider;
use crate::domain::validation::{ValidationRules, Validator};
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{at_least, field, required, Validate, ENV_PLACEHOLDER_PATTERN};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_EXPORT_PATH: &str = "./output";
pub const DEFAULT_EXPORT_FILE_NAME: &str = "employees_{timestamp}.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub company: CompanyConfig,
    #[serde(default)]
    pub validation: ValidationRules,
    pub notification: Option<NotificationConfig>,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub name: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: crate::core::directory::DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub endpoint: Option<String>,
    pub sender: Option<String>,
    pub password: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_path")]
    pub output_path: String,
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub append_on_add: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: default_export_path(),
            file_name: default_export_file_name(),
            append_on_add: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_PATH.to_string()
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAIL_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(ENV_PLACEHOLDER_PATTERN).map_err(|e| DirectoryError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        field("company.name", &self.company.name).non_empty()?;

        // ID 格式必須能編譯
        Validator::new(&self.validation)?;
        for department in &self.validation.departments {
            field("validation.departments", department).non_empty()?;
        }

        if let Some(notification) = self.notification.as_ref().filter(|n| n.enabled) {
            let endpoint = required("notification.endpoint", &notification.endpoint)?;
            field("notification.endpoint", endpoint).resolved()?.http_url()?;

            let sender = required("notification.sender", &notification.sender)?;
            let sender = field("notification.sender", sender).resolved()?;
            if !Validator::default().is_valid_contact(sender.value()) {
                return Err(sender.reject("Sender must be an email address"));
            }

            // 未設定的環境變數不能當成密碼送出
            if let Some(password) = &notification.password {
                field("notification.password", password).resolved()?;
            }

            if let Some(timeout) = notification.timeout_seconds {
                at_least("notification.timeout_seconds", timeout, 1)?;
            }
        }

        field("export.output_path", &self.export.output_path).usable_path()?;
        field("export.file_name", &self.export.file_name).extension("csv")?;

        Ok(())
    }

    /// 是否啟用歡迎信
    pub fn notifications_enabled(&self) -> bool {
        self.notification.as_ref().map(|n| n.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn company_name(&self) -> &str {
        &self.company.name
    }

    fn validation_rules(&self) -> ValidationRules {
        self.validation.clone()
    }

    fn export_path(&self) -> &str {
        &self.export.output_path
    }

    fn export_file_name(&self) -> &str {
        &self.export.file_name
    }

    fn append_on_add(&self) -> bool {
        self.export.append_on_add
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
