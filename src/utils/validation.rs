//! 設定值檢查
//!
//! 以 `field("notification.endpoint", value).http_url()?` 的方式串接檢查，
//! 失敗一律回傳帶有欄位名稱的 `InvalidConfigValueError`。

use crate::utils::error::{DirectoryError, Result};
use regex::Regex;
use std::path::Path;
use url::Url;

/// `${VAR}` 環境變數佔位符
pub const ENV_PLACEHOLDER_PATTERN: &str = r"\$\{([^}]+)\}";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    name: &'a str,
    value: &'a str,
}

pub fn field<'a>(name: &'a str, value: &'a str) -> Field<'a> {
    Field { name, value }
}

impl<'a> Field<'a> {
    pub fn value(&self) -> &'a str {
        self.value
    }

    pub fn reject(&self, reason: impl Into<String>) -> DirectoryError {
        DirectoryError::InvalidConfigValueError {
            field: self.name.to_string(),
            value: self.value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn non_empty(self) -> Result<Self> {
        if self.value.trim().is_empty() {
            return Err(self.reject("Value cannot be empty or whitespace-only"));
        }
        Ok(self)
    }

    /// 只接受 http / https
    pub fn http_url(self) -> Result<Self> {
        let url = Url::parse(self.non_empty()?.value)
            .map_err(|e| self.reject(format!("Invalid URL format: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(self),
            scheme => Err(self.reject(format!("Unsupported URL scheme: {}", scheme))),
        }
    }

    pub fn usable_path(self) -> Result<Self> {
        if self.non_empty()?.value.contains('\0') {
            return Err(self.reject("Path contains null bytes"));
        }
        Ok(self)
    }

    /// 檔名可以是 `{timestamp}` 樣板，只看副檔名
    pub fn extension(self, expected: &str) -> Result<Self> {
        match Path::new(self.value).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(expected) => Ok(self),
            Some(ext) => Err(self.reject(format!(
                "Unsupported file extension: {}. Expected: {}",
                ext, expected
            ))),
            None => Err(self.reject("File has no extension or invalid filename")),
        }
    }

    /// 替換後仍殘留 `${VAR}` 代表環境變數未設定
    pub fn resolved(self) -> Result<Self> {
        let placeholder = Regex::new(ENV_PLACEHOLDER_PATTERN).map_err(|e| {
            DirectoryError::ConfigError {
                message: e.to_string(),
            }
        })?;
        match placeholder.captures(self.value) {
            Some(caps) => Err(self.reject(format!(
                "environment variable {} is not set",
                &caps[1]
            ))),
            None => Ok(self),
        }
    }
}

pub fn required<'a, T>(name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DirectoryError::MissingConfigError {
        field: name.to_string(),
    })
}

pub fn at_least(name: &str, value: u64, min: u64) -> Result<()> {
    if value < min {
        return Err(DirectoryError::InvalidConfigValueError {
            field: name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min),
        });
    }
    Ok(())
}
